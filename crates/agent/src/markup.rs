//! Markdown-ish reply text to display HTML.
//!
//! `**` markers pair up in order: the first opens `<b>`, the next closes it.
//! An odd final marker is dropped. Newlines become `<br>`.

const BOLD_MARKER: &str = "**";

pub fn to_html(text: &str) -> String {
    let pieces: Vec<&str> = text.split(BOLD_MARKER).collect();
    let markers = pieces.len() - 1;
    let paired = markers - markers % 2;

    let mut out = String::with_capacity(text.len() + markers * 2);
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 && i <= paired {
            out.push_str(if i % 2 == 1 { "<b>" } else { "</b>" });
        }
        out.push_str(piece);
    }
    out.replace('\n', "<br>")
}
