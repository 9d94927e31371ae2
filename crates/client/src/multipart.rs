//! Hand-built `multipart/form-data` encoder.
//!
//! ureq v3 bundles no multipart support, so the body is assembled
//! manually with a fixed boundary. Only the two part kinds the platform
//! uses exist: plain text fields and a file with a filename.

const BOUNDARY: &str = "faranga-boundary-4f9a81c2";

#[derive(Debug, Clone)]
enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// A multipart form under construction.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        MultipartForm::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.push(Part::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(Part::File {
            name: name.to_string(),
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            bytes,
        });
        self
    }

    /// The `Content-Type` header value naming the boundary.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    /// Encode all parts into the request body.
    pub fn encode(&self) -> Vec<u8> {
        let mut body: Vec<u8> = Vec::new();
        for part in &self.parts {
            match part {
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!(
                            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                    body.extend_from_slice(b"\r\n");
                }
                Part::File {
                    name,
                    filename,
                    content_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_names_the_boundary() {
        let form = MultipartForm::new();
        assert!(form.content_type().starts_with("multipart/form-data; boundary="));
        assert!(form.content_type().contains(BOUNDARY));
    }

    #[test]
    fn encodes_text_and_file_parts() {
        let form = MultipartForm::new()
            .text("document_type", "national_id")
            .file("file", "id-card.pdf", "application/pdf", b"%PDF-1.4".to_vec());
        let body = String::from_utf8_lossy(&form.encode()).to_string();

        assert!(body.contains("Content-Disposition: form-data; name=\"document_type\""));
        assert!(body.contains("national_id"));
        assert!(body.contains("name=\"file\"; filename=\"id-card.pdf\""));
        assert!(body.contains("Content-Type: application/pdf"));
        assert!(body.contains("%PDF-1.4"));
        assert!(body.ends_with(&format!("--{BOUNDARY}--\r\n")));
    }

    #[test]
    fn empty_form_is_just_the_closing_boundary() {
        let body = MultipartForm::new().encode();
        assert_eq!(body, format!("--{BOUNDARY}--\r\n").as_bytes());
    }
}
