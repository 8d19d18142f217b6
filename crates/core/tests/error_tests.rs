// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use storefront_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn fetch() {
        let err = CoreError::Fetch("connection refused".into());
        assert_eq!(err.to_string(), "Failed to load catalog: connection refused");
    }

    #[test]
    fn product_not_found() {
        let err = CoreError::ProductNotFound("base1-4".into());
        assert_eq!(err.to_string(), "Product not found: base1-4");
    }

    #[test]
    fn persistence() {
        let err = CoreError::Persistence("quota exceeded".into());
        assert_eq!(err.to_string(), "Persistence error: quota exceeded");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad".into());
        assert_eq!(err.to_string(), "Serialization error: bad");
    }

    #[test]
    fn deserialization_empty_message() {
        let err = CoreError::Deserialization(String::new());
        assert_eq!(err.to_string(), "Deserialization error: ");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("disk full".into());
        assert_eq!(err.to_string(), "File I/O error: disk full");
    }

    #[test]
    fn empty_cart() {
        assert_eq!(CoreError::EmptyCart.to_string(), "Your cart is empty");
    }

    #[test]
    fn invalid_settings() {
        let err = CoreError::InvalidSettings("page_size must be at least 1".into());
        assert_eq!(err.to_string(), "Invalid settings: page_size must be at least 1");
    }
}

// ── User-facing messages ────────────────────────────────────────────

mod user_message {
    use super::*;

    #[test]
    fn fetch_hides_transport_detail() {
        let msg = CoreError::Fetch("error sending request for url (http://x/y)".into()).user_message();
        assert_eq!(msg, "The cards could not be loaded. Please try again later.");
        assert!(!msg.contains("http"));
    }

    #[test]
    fn product_not_found_points_back_to_catalog() {
        let msg = CoreError::ProductNotFound("42".into()).user_message();
        assert!(msg.contains("Return to the catalog"));
    }

    #[test]
    fn persistence_asks_to_retry() {
        let msg = CoreError::Persistence("quota".into()).user_message();
        assert_eq!(msg, "Your cart could not be saved. Please try again.");
    }

    #[test]
    fn other_variants_use_display() {
        assert_eq!(CoreError::EmptyCart.user_message(), "Your cart is empty");
        let err = CoreError::InvalidSettings("x".into());
        assert_eq!(err.user_message(), err.to_string());
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("denied")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_converts_io() {
        fn read() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here/catalog.json")?)
        }
        assert!(matches!(read(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn errors_are_debug_and_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty");
        assert!(format!("{:?}", CoreError::EmptyCart).contains("EmptyCart"));
    }
}
