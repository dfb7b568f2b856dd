//! Key validation and accumulation shared by both parsers.

use std::collections::BTreeMap;
use std::path::Path;

use agentmeta_core::{Error, KeyValidator, MetaKey, MetaValue, Result};

/// Validated metadata, keyed uniquely. A repeated key replaces the earlier value.
pub(crate) type Fields = BTreeMap<MetaKey, MetaValue>;

/// Validate `key` and insert it into `fields`.
///
/// The reserved `system` key is rejected without consulting the validator.
pub(crate) fn admit(
    fields: &mut Fields,
    key: MetaKey,
    value: MetaValue,
    validator: &dyn KeyValidator,
    origin: &Path,
) -> Result<()> {
    if key.is_reserved() || !validator.allows(&key) {
        return Err(Error::invalid_key(key.as_str(), origin));
    }
    fields.insert(key, value);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use agentmeta_core::AllowList;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_admit_allowed_key() {
        let mut fields = Fields::new();
        admit(
            &mut fields,
            MetaKey::NAME,
            "coder".into(),
            &AllowList::default(),
            Path::new("a.md"),
        )
        .unwrap();
        assert_eq!(fields[&MetaKey::NAME], MetaValue::from("coder"));
    }

    #[test]
    fn test_admit_last_write_wins() {
        let mut fields = Fields::new();
        let validator = AllowList::default();
        for name in ["first", "second"] {
            admit(&mut fields, MetaKey::NAME, name.into(), &validator, Path::new("a.md")).unwrap();
        }
        assert_eq!(fields[&MetaKey::NAME], MetaValue::from("second"));
    }

    #[test]
    fn test_admit_rejects_unknown_key() {
        let mut fields = Fields::new();
        let err = admit(
            &mut fields,
            MetaKey::new("temperature"),
            "0.2".into(),
            &AllowList::default(),
            Path::new("a.md"),
        )
        .unwrap_err();
        assert_eq!(err.invalid_key_name(), Some("temperature"));
        assert!(fields.is_empty());
    }

    #[test]
    fn test_admit_never_asks_about_system() {
        let calls = AtomicUsize::new(0);
        let counting = |_: &MetaKey| {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        };
        let mut fields = Fields::new();
        let err = admit(
            &mut fields,
            MetaKey::SYSTEM,
            "x".into(),
            &counting,
            Path::new("a.md"),
        )
        .unwrap_err();

        assert_eq!(err.invalid_key_name(), Some("system"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
