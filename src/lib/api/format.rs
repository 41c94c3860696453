/// Characters that must be backslash-escaped in MarkdownV2 text.
const MARKDOWN_V2_RESERVED: &str = "_*[]()~`>#+-=|{}.!\\";

/// Escapes `text` for use in a MarkdownV2 message.
pub fn escape_md(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        if MARKDOWN_V2_RESERVED.contains(c) {
            out.push('\\');
        }
        out.push(c);
        out
    })
}
