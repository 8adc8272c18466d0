//! Raw RFC 5322 message builders.

#![allow(dead_code)]

/// A single-part `text/html` message.
pub fn html_message(body: &str) -> Vec<u8> {
    format!(
        "From: sender@example.com\r\n\
         To: alice@example.com\r\n\
         Subject: links\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         \r\n\
         {}\r\n",
        body
    )
    .into_bytes()
}

/// A plain-text-only message.
pub fn plain_message(body: &str) -> Vec<u8> {
    format!(
        "From: sender@example.com\r\n\
         Subject: plain\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         \r\n\
         {}\r\n",
        body
    )
    .into_bytes()
}

/// `multipart/alternative` with a text part and an HTML part.
pub fn alternative_message(text: &str, html: &str) -> Vec<u8> {
    format!(
        "From: sender@example.com\r\n\
         Subject: alternative\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: multipart/alternative; boundary=\"alt-boundary\"\r\n\
         \r\n\
         --alt-boundary\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         \r\n\
         {}\r\n\
         --alt-boundary\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         \r\n\
         {}\r\n\
         --alt-boundary--\r\n",
        text, html
    )
    .into_bytes()
}

/// An HTML part whose base64 payload is garbage.
pub fn corrupt_html_message() -> Vec<u8> {
    b"From: sender@example.com\r\n\
      Subject: corrupt\r\n\
      Content-Type: text/html; charset=utf-8\r\n\
      Content-Transfer-Encoding: base64\r\n\
      \r\n\
      !!!! %%%% not base64 at all ~~~~\r\n"
        .to_vec()
}

/// `multipart/mixed` holding an undecodable HTML part followed by a good one.
pub fn mixed_message_with_corrupt_part(html: &str) -> Vec<u8> {
    format!(
        "From: sender@example.com\r\n\
         Subject: mixed\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: multipart/mixed; boundary=\"mix-boundary\"\r\n\
         \r\n\
         --mix-boundary\r\n\
         Content-Type: text/html; charset=x-no-such-charset\r\n\
         Content-Transfer-Encoding: base64\r\n\
         \r\n\
         !!!! %%%% not base64 at all ~~~~\r\n\
         --mix-boundary\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         \r\n\
         {}\r\n\
         --mix-boundary--\r\n",
        html
    )
    .into_bytes()
}

/// HTML fragment with one anchor per target, in order.
pub fn anchors(targets: &[&str]) -> String {
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| format!("<a href=\"{}\">link {}</a>", target, i))
        .collect::<Vec<_>>()
        .join(" ")
}
