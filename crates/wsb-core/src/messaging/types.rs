/// Background color of a published status (ARGB, black).
pub const STATUS_BACKGROUND_ARGB: u32 = 0xFF00_0000;
/// Text color of a published status (ARGB, white).
pub const STATUS_TEXT_ARGB: u32 = 0xFFFF_FFFF;
/// Font identifier of a published status.
pub const STATUS_FONT_SYSTEM: &str = "SYSTEM";

/// A status broadcast to publish.
///
/// Presentation attributes are fixed constants, not configuration; the
/// dispatcher only ever supplies the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusUpdate {
    pub text: String,
    pub background_argb: u32,
    pub text_argb: u32,
    pub font: String,
}

impl StatusUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            background_argb: STATUS_BACKGROUND_ARGB,
            text_argb: STATUS_TEXT_ARGB,
            font: STATUS_FONT_SYSTEM.to_string(),
        }
    }
}
