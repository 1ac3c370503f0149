//! Slot Style - variant precedence with explicitly tagged values
//!
//! Each slot picks its presentation from up to four configured variants:
//! base, focused, disabled, errored, with precedence error > disabled >
//! focused > base. A variant value is an explicit tagged enum - either a
//! literal prop bag or a named style - so resolution is a match, never
//! runtime type inspection.
//!
//! Prop bags merge additively in precedence order (a higher-precedence
//! variant overrides per field, unset fields inherit). Named styles collect
//! into an ordered list for the host's theme to resolve; the built-in row
//! projection only consumes prop bags.
//!
//! # Example
//!
//! ```ignore
//! use otp_field::style::{SlotStyle, SlotStyles, StyleProps, resolve};
//! use otp_field::Rgba;
//!
//! let styles = SlotStyles {
//!     base: Some(SlotStyle::fg(Rgba::WHITE)),
//!     errored: Some(SlotStyle::fg(Rgba::RED)),
//!     ..Default::default()
//! };
//!
//! let resolved = resolve(&styles, true, false, true);
//! assert_eq!(resolved.props.fg, Some(Rgba::RED));
//! ```

use crate::types::{Attr, Rgba};

// =============================================================================
// StyleProps
// =============================================================================

/// Partial style prop bag. Unset fields inherit from lower precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleProps {
    /// Foreground (text) color
    pub fg: Option<Rgba>,
    /// Background color
    pub bg: Option<Rgba>,
    /// Attribute flags (bold, dim, inverse, ...)
    pub attrs: Option<Attr>,
}

impl StyleProps {
    /// Merge `over` on top of self: set fields of `over` win, unset fields
    /// keep the current value.
    pub fn merged(self, over: StyleProps) -> StyleProps {
        StyleProps {
            fg: over.fg.or(self.fg),
            bg: over.bg.or(self.bg),
            attrs: over.attrs.or(self.attrs),
        }
    }
}

// =============================================================================
// SlotStyle - the tagged style value
// =============================================================================

/// One configured style variant value.
///
/// `Props` carries literal styling and participates in the additive merge.
/// `Named` is an opaque style name collected for the host's theme; the two
/// never mix implicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotStyle {
    Props(StyleProps),
    Named(String),
}

impl SlotStyle {
    /// Literal foreground-only styling.
    pub fn fg(color: Rgba) -> Self {
        Self::Props(StyleProps {
            fg: Some(color),
            ..Default::default()
        })
    }

    /// Literal background-only styling.
    pub fn bg(color: Rgba) -> Self {
        Self::Props(StyleProps {
            bg: Some(color),
            ..Default::default()
        })
    }

    /// Literal attribute-only styling.
    pub fn attrs(attrs: Attr) -> Self {
        Self::Props(StyleProps {
            attrs: Some(attrs),
            ..Default::default()
        })
    }

    /// A named style for the host's theme to resolve.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

/// The configured style variants for slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotStyles {
    /// Styling every slot starts from.
    pub base: Option<SlotStyle>,
    /// Applied to the currently active slot.
    pub focused: Option<SlotStyle>,
    /// Applied when the field is disabled.
    pub disabled: Option<SlotStyle>,
    /// Applied when the field is in the errored state.
    pub errored: Option<SlotStyle>,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolution result: the merged prop bag plus the applicable style names
/// in application order (base first, error last).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    pub props: StyleProps,
    pub names: Vec<String>,
}

/// Resolve a slot's effective style from its flags.
///
/// Variants apply base-first so the merge leaves the highest-precedence
/// variant's fields on top: error > disabled > focused > base.
pub fn resolve(styles: &SlotStyles, focused: bool, disabled: bool, errored: bool) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::default();

    let mut apply = |variant: &Option<SlotStyle>| {
        if let Some(style) = variant {
            match style {
                SlotStyle::Props(props) => resolved.props = resolved.props.merged(*props),
                SlotStyle::Named(name) => resolved.names.push(name.clone()),
            }
        }
    };

    apply(&styles.base);
    if focused {
        apply(&styles.focused);
    }
    if disabled {
        apply(&styles.disabled);
    }
    if errored {
        apply(&styles.errored);
    }

    resolved
}

/// Built-in fallback styling for the row projection, applied beneath any
/// configured props: focused cells render inverse, disabled cells dim,
/// errored cells red.
pub fn fallback_props(focused: bool, disabled: bool, errored: bool) -> StyleProps {
    let mut attrs = Attr::NONE;
    if focused {
        attrs |= Attr::INVERSE;
    }
    if disabled {
        attrs |= Attr::DIM;
    }
    StyleProps {
        fg: errored.then_some(Rgba::RED),
        bg: None,
        attrs: (attrs != Attr::NONE).then_some(attrs),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_styles() -> SlotStyles {
        SlotStyles {
            base: Some(SlotStyle::fg(Rgba::WHITE)),
            focused: Some(SlotStyle::fg(Rgba::CYAN)),
            disabled: Some(SlotStyle::fg(Rgba::GRAY)),
            errored: Some(SlotStyle::fg(Rgba::RED)),
        }
    }

    #[test]
    fn test_base_only() {
        let resolved = resolve(&full_styles(), false, false, false);
        assert_eq!(resolved.props.fg, Some(Rgba::WHITE));
        assert!(resolved.names.is_empty());
    }

    #[test]
    fn test_precedence_order() {
        let styles = full_styles();

        // focused beats base
        let resolved = resolve(&styles, true, false, false);
        assert_eq!(resolved.props.fg, Some(Rgba::CYAN));

        // disabled beats focused
        let resolved = resolve(&styles, true, true, false);
        assert_eq!(resolved.props.fg, Some(Rgba::GRAY));

        // errored beats everything
        let resolved = resolve(&styles, true, true, true);
        assert_eq!(resolved.props.fg, Some(Rgba::RED));
    }

    #[test]
    fn test_merge_is_additive_across_fields() {
        let styles = SlotStyles {
            base: Some(SlotStyle::Props(StyleProps {
                fg: Some(Rgba::WHITE),
                bg: Some(Rgba::BLACK),
                attrs: None,
            })),
            focused: Some(SlotStyle::attrs(Attr::BOLD)),
            ..Default::default()
        };

        // focused only sets attrs; fg/bg inherit from base
        let resolved = resolve(&styles, true, false, false);
        assert_eq!(resolved.props.fg, Some(Rgba::WHITE));
        assert_eq!(resolved.props.bg, Some(Rgba::BLACK));
        assert_eq!(resolved.props.attrs, Some(Attr::BOLD));
    }

    #[test]
    fn test_named_styles_collect_in_order() {
        let styles = SlotStyles {
            base: Some(SlotStyle::named("otp-slot")),
            focused: Some(SlotStyle::named("otp-slot-focus")),
            errored: Some(SlotStyle::named("otp-slot-error")),
            ..Default::default()
        };

        let resolved = resolve(&styles, true, false, true);
        assert_eq!(
            resolved.names,
            vec!["otp-slot".to_string(), "otp-slot-focus".to_string(), "otp-slot-error".to_string()]
        );
        // Named variants contribute nothing to the prop merge
        assert_eq!(resolved.props, StyleProps::default());
    }

    #[test]
    fn test_mixed_tags_stay_separate() {
        let styles = SlotStyles {
            base: Some(SlotStyle::fg(Rgba::WHITE)),
            focused: Some(SlotStyle::named("focus-ring")),
            disabled: None,
            errored: Some(SlotStyle::fg(Rgba::RED)),
        };

        let resolved = resolve(&styles, true, false, true);
        assert_eq!(resolved.props.fg, Some(Rgba::RED));
        assert_eq!(resolved.names, vec!["focus-ring".to_string()]);
    }

    #[test]
    fn test_inapplicable_variants_skipped() {
        let resolved = resolve(&full_styles(), false, false, true);
        assert_eq!(resolved.props.fg, Some(Rgba::RED));

        let resolved = resolve(&full_styles(), false, true, false);
        assert_eq!(resolved.props.fg, Some(Rgba::GRAY));
    }

    #[test]
    fn test_fallback_props() {
        assert_eq!(fallback_props(false, false, false), StyleProps::default());

        let focused = fallback_props(true, false, false);
        assert_eq!(focused.attrs, Some(Attr::INVERSE));
        assert_eq!(focused.fg, None);

        let disabled_errored = fallback_props(false, true, true);
        assert_eq!(disabled_errored.attrs, Some(Attr::DIM));
        assert_eq!(disabled_errored.fg, Some(Rgba::RED));
    }
}
