//! Core types for spark-template.
//!
//! The closed render category, the computed style a template exposes to the
//! layout bridge, and the small value types that hang off it.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// =============================================================================
// Node Type - The closed render category
// =============================================================================

/// Render category of a template node.
///
/// Exactly one category applies to any node. Every `is_*_type` predicate on
/// [`TemplateNode`](crate::template::TemplateNode) and
/// [`Node`](crate::node::Node) is an equality check against this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum NodeType {
    #[default]
    View = 0,
    Text = 1,
    RichText = 2,
    /// Nested template reference.
    Template = 3,
    CustomView = 4,
    IconFont = 5,
    Image = 6,
    Container = 7,
    Grid = 8,
    Scroll = 9,
    Slider = 10,
    Progress = 11,
}

impl NodeType {
    /// Every category, in tag order.
    pub const ALL: [Self; 12] = [
        Self::View,
        Self::Text,
        Self::RichText,
        Self::Template,
        Self::CustomView,
        Self::IconFont,
        Self::Image,
        Self::Container,
        Self::Grid,
        Self::Scroll,
        Self::Slider,
        Self::Progress,
    ];

    /// Name used for this category in template descriptions.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Text => "text",
            Self::RichText => "richtext",
            Self::Template => "gaia-template",
            Self::CustomView => "custom",
            Self::IconFont => "iconfont",
            Self::Image => "image",
            Self::Container => "container",
            Self::Grid => "grid",
            Self::Scroll => "scroll",
            Self::Slider => "slider",
            Self::Progress => "progress",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownNodeType(s.to_string()))
    }
}

// =============================================================================
// Node Flags
// =============================================================================

bitflags::bitflags! {
    /// Identity flags of a node within its tree.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Root of the outermost template tree.
        const ROOT = 1 << 0;
        /// Root of a nested template instantiated inside another tree.
        const NEST_ROOT = 1 << 1;
    }
}

// =============================================================================
// Dimension
// =============================================================================

/// A length in a template style.
///
/// ```
/// use spark_template::types::Dimension;
///
/// let width = Dimension::Points(50.0);    // 50 logical points
/// let height = Dimension::Percent(100.0); // Full parent height
/// let auto = Dimension::Auto;             // Content-determined
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    /// Absolute size in logical points.
    Points(f32),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl Dimension {
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Edge values (padding, margin) in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self::all(0.0);

    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

// =============================================================================
// Flex Enums - For layout
// =============================================================================

/// Whether a node takes part in layout at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Display {
    #[default]
    Flex = 0,
    None = 1,
}

/// Position type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Position {
    #[default]
    Relative = 0,
    Absolute = 1,
}

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Row = 0,
    Column = 1,
    RowReverse = 2,
    ColumnReverse = 3,
}

/// Flex wrap behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexWrap {
    #[default]
    NoWrap = 0,
    Wrap = 1,
    WrapReverse = 2,
}

/// Justify content (main axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum JustifyContent {
    #[default]
    FlexStart = 0,
    Center = 1,
    FlexEnd = 2,
    SpaceBetween = 3,
    SpaceAround = 4,
    SpaceEvenly = 5,
}

/// Align items (cross axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignItems {
    #[default]
    Stretch = 0,
    FlexStart = 1,
    Center = 2,
    FlexEnd = 3,
    Baseline = 4,
}

/// Align self (item override for align items). `Auto` inherits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AlignSelf {
    #[default]
    Auto = 0,
    Stretch = 1,
    FlexStart = 2,
    Center = 3,
    FlexEnd = 4,
    Baseline = 5,
}

/// Overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Overflow {
    #[default]
    Visible = 0,
    Hidden = 1,
    Scroll = 2,
}

// =============================================================================
// Box Shadow
// =============================================================================

/// Box shadow declared by a template style.
///
/// Only `view` and `image` nodes draw one, through a sibling shadow view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxShadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur_radius: f32,
    pub spread_radius: f32,
    /// Packed 0xAARRGGBB.
    pub color: u32,
}

// =============================================================================
// Node Style
// =============================================================================

/// Computed style of one template node.
///
/// This is what the layout bridge reads when a node is reseeded. Anything a
/// renderer needs beyond layout (box shadow, padding for drawing) is exposed
/// here as a computed value too.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub display: Display,
    pub position: Position,

    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_self: AlignSelf,

    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Dimension,

    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,

    pub margin: EdgeInsets,
    pub padding: EdgeInsets,

    pub overflow: Overflow,
    pub box_shadow: Option<BoxShadow>,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            display: Display::Flex,
            position: Position::Relative,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_self: AlignSelf::Auto,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Dimension::Auto,
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_width: Dimension::Auto,
            max_height: Dimension::Auto,
            margin: EdgeInsets::ZERO,
            padding: EdgeInsets::ZERO,
            overflow: Overflow::Visible,
            box_shadow: None,
        }
    }
}

// =============================================================================
// Animation Binding
// =============================================================================

/// Animation type name reserved for lottie overlays.
pub const ANIMATION_TYPE_LOTTIE: &str = "lottie";

/// Animation declared on a template node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimationBinding {
    /// Declared type, e.g. `"lottie"` or `"prop"`. Compared case-insensitively.
    pub kind: String,
}

impl AnimationBinding {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn is_lottie(&self) -> bool {
        self.kind.eq_ignore_ascii_case(ANIMATION_TYPE_LOTTIE)
    }
}
