use std::fs::File;
use std::io;
use std::path::Path;

use crate::errors::*;

pub type SlotName = String;
pub type DomainName = String;

/// Opens a required file, mapping a missing path to `MissingResource`
/// instead of a bare io error.
pub fn open_resource<P: AsRef<Path>>(path: P) -> Result<File> {
    File::open(path.as_ref()).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            DstDatagenError::MissingResource(path.as_ref().to_string_lossy().to_string()).into()
        } else {
            err.into()
        }
    })
}

/// Splits a composite "domain-slot" name on its first separator.
pub fn split_domain_slot(slot: &str) -> (&str, Option<&str>) {
    match slot.find('-') {
        Some(pos) => (&slot[..pos], Some(&slot[pos + 1..])),
        None => (slot, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_domain_slot() {
        // Given
        let composite = "hotel-book day";
        let plain = "hotel";

        // When
        let (domain, slot) = split_domain_slot(composite);
        let (bare, none) = split_domain_slot(plain);

        // Then
        assert_eq!("hotel", domain);
        assert_eq!(Some("book day"), slot);
        assert_eq!("hotel", bare);
        assert_eq!(None, none);
    }

    #[test]
    fn test_open_resource_maps_missing_file() {
        // Given
        let path = Path::new("definitely/not/a/file.json");

        // When
        let result = open_resource(path);

        // Then
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Missing resource file"));
    }
}
