//! Keyed projection of decoded entities into labeled display values.
//!
//! Each entity declares a closed set of field keys once, with the
//! [`field_keys!`] macro, and implements [`Projectable::value_for`] to render
//! one field. Everything else (ordered dictionaries, localized labels, key
//! descriptors) is derived from that.
//!
//! Key order is declaration order. The macro derives `Ord` on the key enum,
//! so a `BTreeMap` keyed by it iterates in that order too.

use mediameta_common::{DisplayContext, RoundingRule, SizeUnit, SizeValue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Static description of one field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyDescriptor {
    /// Wire field name.
    pub id: &'static str,
    /// Zero-based declaration order.
    pub index: usize,
    /// English label.
    pub label: &'static str,
}

/// A closed, ordered set of field keys.
pub trait FieldKey: Copy + Ord + Hash + Debug + 'static {
    /// Every key, in declaration order.
    const ALL: &'static [Self];

    /// Wire field name.
    fn id(self) -> &'static str;

    /// English label, also the translation key.
    fn label(self) -> &'static str;

    /// Zero-based declaration order.
    fn index(self) -> usize {
        Self::ALL.iter().position(|key| *key == self).unwrap_or_default()
    }

    /// Look a key up by its wire name.
    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.id() == id)
    }

    /// Label passed through the context's translator.
    fn localized_label(self, ctx: &DisplayContext) -> String {
        ctx.text(self.label())
    }

    /// `{id, index, label}` for this key.
    fn descriptor(self) -> KeyDescriptor {
        KeyDescriptor {
            id: self.id(),
            index: self.index(),
            label: self.label(),
        }
    }
}

/// An entity that can render each of its fields for display.
pub trait Projectable {
    /// The entity's key set.
    type Key: FieldKey;

    /// Render one field, or `None` when it is absent or not displayable.
    fn value_for(&self, key: Self::Key, ctx: &DisplayContext) -> Option<String>;

    /// Every present field, in declaration order.
    fn as_dictionary(&self, ctx: &DisplayContext) -> BTreeMap<Self::Key, String> {
        Self::Key::ALL
            .iter()
            .filter_map(|&key| self.value_for(key, ctx).map(|value| (key, value)))
            .collect()
    }

    /// Every present field as `(localized label, value)`, in declaration
    /// order.
    fn labeled(&self, ctx: &DisplayContext) -> Vec<(String, String)> {
        self.as_dictionary(ctx)
            .into_iter()
            .map(|(key, value)| (key.localized_label(ctx), value))
            .collect()
    }

    /// Descriptors of the whole key set, present or not.
    fn descriptors() -> Vec<KeyDescriptor>
    where
        Self: Sized,
    {
        Self::Key::ALL.iter().map(|key| key.descriptor()).collect()
    }
}

/// Declare a key enum and its [`FieldKey`] impl.
///
/// ```ignore
/// field_keys! {
///     /// Keys of a thing.
///     pub enum ThingKey {
///         /// Its name.
///         Name => ("name", "Name"),
///     }
/// }
/// ```
macro_rules! field_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[doc = $doc:expr])*
                $variant:ident => ($id:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $(
                $(#[doc = $doc])*
                $variant,
            )+
        }

        impl $crate::keyed::FieldKey for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

pub(crate) use field_keys;

/// Render an integer count of `unit` in its optimal unit under `rule`.
pub(crate) fn render_size(
    count: Option<i64>,
    unit: SizeUnit,
    rule: Option<RoundingRule>,
    ctx: &DisplayContext,
) -> Option<String> {
    count.map(|count| SizeValue::from_count(count, unit).optimal(rule).formatted(ctx))
}
