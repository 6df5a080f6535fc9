//! Document information utilities built on top of `lopdf`.
//!
//! The layout engine does not expose every PDF metadata field, so the
//! rendered bytes get a post-pass here that writes the title and author
//! into the document information dictionary.

use lopdf::{Dictionary, Document, Object};

/// Errors that can occur while embedding metadata into a rendered PDF.
#[derive(Debug)]
pub enum MetadataError {
    /// The PDF bytes could not be parsed or re-serialized by `lopdf`.
    Parse(lopdf::Error),
    /// The trailer references an information dictionary that does not exist
    /// or is not a dictionary.
    InvalidInfo,
}

impl From<lopdf::Error> for MetadataError {
    fn from(err: lopdf::Error) -> Self {
        Self::Parse(err)
    }
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to process PDF bytes: {err}"),
            Self::InvalidInfo => write!(f, "PDF information dictionary is not usable"),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidInfo => None,
        }
    }
}

/// Writes `title` and `author` into the document information dictionary.
///
/// An existing dictionary is amended in place; otherwise a fresh one is
/// created and linked from the trailer. Returns the re-serialized bytes.
pub fn apply_document_info(
    pdf_bytes: &[u8],
    title: &str,
    author: &str,
) -> Result<Vec<u8>, MetadataError> {
    let mut document = Document::load_mem(pdf_bytes)?;

    let existing = document
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok();

    match existing {
        Some(id) => {
            let info = document
                .objects
                .get_mut(&id)
                .ok_or(MetadataError::InvalidInfo)?
                .as_dict_mut()
                .map_err(|_| MetadataError::InvalidInfo)?;
            set_info_entries(info, title, author);
        }
        None => {
            let mut info = Dictionary::new();
            set_info_entries(&mut info, title, author);
            let id = document.add_object(Object::Dictionary(info));
            document.trailer.set("Info", Object::Reference(id));
        }
    }

    let mut buffer = Vec::new();
    document.save_to(&mut buffer).map_err(lopdf::Error::from)?;
    Ok(buffer)
}

fn set_info_entries(info: &mut Dictionary, title: &str, author: &str) {
    info.set("Title", Object::string_literal(title));
    info.set("Author", Object::string_literal(author));
}

#[cfg(test)]
mod tests {
    use super::*;

    use lopdf::dictionary;

    fn minimal_pdf() -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).expect("serialize minimal pdf");
        bytes
    }

    #[test]
    fn info_dictionary_is_created_when_absent() {
        let bytes = minimal_pdf();
        let stamped =
            apply_document_info(&bytes, "Deployment Report", "thaboxan").expect("stamp metadata");

        let reloaded = Document::load_mem(&stamped).expect("reload stamped pdf");
        let info_id = reloaded
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .expect("trailer references info");
        let info = reloaded
            .get_object(info_id)
            .and_then(Object::as_dict)
            .expect("info dictionary");
        let title = info
            .get(b"Title")
            .and_then(Object::as_str)
            .expect("title entry");
        assert_eq!(title, b"Deployment Report");
        let author = info
            .get(b"Author")
            .and_then(Object::as_str)
            .expect("author entry");
        assert_eq!(author, b"thaboxan");
    }

    #[test]
    fn existing_info_dictionary_is_amended() {
        let bytes = minimal_pdf();
        let first = apply_document_info(&bytes, "Old Title", "someone").expect("first stamp");
        let second = apply_document_info(&first, "New Title", "thaboxan").expect("second stamp");

        let reloaded = Document::load_mem(&second).expect("reload stamped pdf");
        let info_id = reloaded
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .expect("trailer references info");
        let info = reloaded
            .get_object(info_id)
            .and_then(Object::as_dict)
            .expect("info dictionary");
        assert_eq!(
            info.get(b"Title").and_then(Object::as_str).unwrap(),
            b"New Title"
        );
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(apply_document_info(b"not a pdf", "t", "a").is_err());
    }
}
