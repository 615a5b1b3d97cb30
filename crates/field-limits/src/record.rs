use crate::error::Result;
use crate::limits::FieldLimits;

/// A record type with a registered constraint table
///
/// The table is usually built once into a `LazyLock` static:
///
/// ```
/// use field_limits::{FieldBounds, FieldLimits, Record};
/// use std::sync::LazyLock;
///
/// struct Signup {
///     username: String,
///     email: String,
///     password: Vec<u8>,
/// }
///
/// static SIGNUP_LIMITS: LazyLock<FieldLimits<Signup>> = LazyLock::new(|| {
///     FieldLimits::builder()
///         .field_tagged("Username", |s: &Signup| &s.username, r#"json:"username" max:"30""#)
///         .field("Email", |s: &Signup| &s.email, FieldBounds::max(64))
///         .field("Password", |s: &Signup| &s.password, FieldBounds::max(128))
///         .build()
/// });
///
/// impl Record for Signup {
///     fn field_limits() -> &'static FieldLimits<Self> {
///         &SIGNUP_LIMITS
///     }
/// }
///
/// let signup = Signup {
///     username: "ecnepsnai".to_string(),
///     email: "ian@ecn.io".to_string(),
///     password: b"hunter2".to_vec(),
/// };
/// assert!(signup.check_limits().is_ok());
/// assert!(Box::new(signup).check_limits().is_ok());
/// ```
pub trait Record: Sized + 'static {
    fn field_limits() -> &'static FieldLimits<Self>;

    /// Check this record against its registered limits
    fn check_limits(&self) -> Result<()> {
        Self::field_limits().check(self)
    }
}

/// Check a record against its registered limits.
///
/// References and smart pointers deref to the record, so `check(&*boxed)`
/// and `boxed.check_limits()` agree with checking the value itself.
pub fn check<R: Record>(record: &R) -> Result<()> {
    record.check_limits()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::FieldBounds;
    use std::rc::Rc;
    use std::sync::{Arc, LazyLock};

    #[derive(Clone)]
    struct Profile {
        display_name: String,
        bio: Option<String>,
        tags: Vec<String>,
    }

    static PROFILE_LIMITS: LazyLock<FieldLimits<Profile>> = LazyLock::new(|| {
        FieldLimits::builder()
            .field("DisplayName", |p: &Profile| &p.display_name, FieldBounds::range(1, 16))
            .field("Bio", |p: &Profile| &p.bio, FieldBounds::max(20))
            .field("Tags", |p: &Profile| &p.tags, FieldBounds::max(2))
            .build()
    });

    impl Record for Profile {
        fn field_limits() -> &'static FieldLimits<Self> {
            &PROFILE_LIMITS
        }
    }

    struct Bare;

    static BARE_LIMITS: LazyLock<FieldLimits<Bare>> = LazyLock::new(FieldLimits::default);

    impl Record for Bare {
        fn field_limits() -> &'static FieldLimits<Self> {
            &BARE_LIMITS
        }
    }

    fn profile(display_name: &str, tags: usize) -> Profile {
        Profile {
            display_name: display_name.to_string(),
            bio: None,
            tags: vec!["moth".to_string(); tags],
        }
    }

    #[test]
    fn test_check_valid() {
        assert!(check(&profile("ecnepsnai", 2)).is_ok());
    }

    #[test]
    fn test_check_reports_violation() {
        let err = check(&profile("ecnepsnai", 3)).unwrap_err();
        assert_eq!(err.to_string(), "value for 'Tags' exceeds maximum 2 elements");
    }

    #[test]
    fn test_unset_option_measures_empty() {
        let mut p = profile("ecnepsnai", 0);
        assert!(check(&p).is_ok());
        p.bio = Some("a".repeat(21));
        let err = check(&p).unwrap_err();
        assert_eq!(err.to_string(), "value for 'Bio' exceeds maximum 20 characters");
    }

    #[test]
    fn test_indirection_is_transparent() {
        let p = profile("", 0);
        let direct = check(&p);
        assert!(direct.is_err());

        let by_ref = &p;
        let boxed = Box::new(p.clone());
        let rc = Rc::new(p.clone());
        let arc = Arc::new(p.clone());

        assert_eq!(check(by_ref), direct);
        assert_eq!((&by_ref).check_limits(), direct);
        assert_eq!(check(&*boxed), direct);
        assert_eq!(boxed.check_limits(), direct);
        assert_eq!(rc.check_limits(), direct);
        assert_eq!(arc.check_limits(), direct);
    }

    #[test]
    fn test_record_without_fields() {
        assert!(check(&Bare).is_ok());
        assert!(Bare::field_limits().is_empty());
    }

    #[test]
    fn test_concurrent_checks() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || check(&profile("ecnepsnai", i)).is_ok()))
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, [true, true, true, false]);
    }
}
