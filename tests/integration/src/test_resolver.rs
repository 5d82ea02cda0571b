//! Resolver failure handling tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use xsignature_auth::{
        FnResolver, ResolveError, SecretResolver, SignatureError, SyncFnResolver, VerifyOptions,
        generate, validate, verify,
    };
    use xsignature_core::{IntegrationId, SecretKey};

    use crate::{PARTNER_XYZ, PARTNER_XYZ_KEY, SlowKeyStore, booking_body};

    #[tokio::test]
    async fn test_should_distinguish_unknown_integration_from_bad_signature() {
        let store = SlowKeyStore::with_partner_keys(Duration::from_millis(1));

        let unknown = validate(
            "unknown-integration.1703097600000.abcdef123456",
            &booking_body(),
            &store,
            300_000,
        )
        .await;
        assert_eq!(
            unknown,
            Err(ResolveError::UnknownIntegration(
                "unknown-integration".to_owned()
            ))
        );

        let forged = generate(&booking_body(), PARTNER_XYZ, "not-the-real-key").unwrap();
        assert_eq!(validate(&forged, &booking_body(), &store, 300_000).await, Ok(false));
    }

    #[tokio::test]
    async fn test_should_propagate_unavailable_key_store() {
        let store = SlowKeyStore::offline();
        let token = generate(&booking_body(), PARTNER_XYZ, PARTNER_XYZ_KEY).unwrap();

        let result = verify(&token, &booking_body(), &store, &VerifyOptions::default()).await;
        match result {
            Err(err @ SignatureError::Resolve(ResolveError::Unavailable(_))) => {
                assert!(!err.is_rejection());
            }
            other => panic!("expected resolver failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_should_skip_lookup_for_malformed_token() {
        let store = SlowKeyStore::with_partner_keys(Duration::ZERO);

        let result = validate("not-a-valid-token", &booking_body(), &store, 300_000).await;
        assert_eq!(result, Ok(false));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn test_should_skip_lookup_for_unexpected_integration() {
        let store = SlowKeyStore::with_partner_keys(Duration::ZERO);
        let token = generate(&booking_body(), "partner-abc", "another-secret-key-67890").unwrap();
        let options = VerifyOptions::default()
            .with_expected_integration_id(IntegrationId::new(PARTNER_XYZ).unwrap());

        let result = verify(&token, &booking_body(), &store, &options).await;
        assert!(matches!(
            result,
            Err(SignatureError::IntegrationMismatch { .. })
        ));
        assert_eq!(store.lookups(), 0);
    }

    #[tokio::test]
    async fn test_should_verify_with_shared_dyn_resolver() {
        let shared: Arc<dyn SecretResolver> =
            Arc::new(SlowKeyStore::with_partner_keys(Duration::ZERO));
        let token = generate(&booking_body(), PARTNER_XYZ, PARTNER_XYZ_KEY).unwrap();

        let result = validate(&token, &booking_body(), shared.as_ref(), 300_000).await;
        assert_eq!(result, Ok(true));
    }

    #[tokio::test]
    async fn test_should_verify_with_closure_resolvers() {
        let token = generate(&booking_body(), PARTNER_XYZ, PARTNER_XYZ_KEY).unwrap();

        let async_lookup = FnResolver::new(|id: String| async move {
            tokio::time::sleep(Duration::from_millis(2)).await;
            if id == PARTNER_XYZ {
                Ok(SecretKey::from(PARTNER_XYZ_KEY))
            } else {
                Err(ResolveError::UnknownIntegration(id))
            }
        });
        assert_eq!(
            validate(&token, &booking_body(), &async_lookup, 300_000).await,
            Ok(true)
        );

        let blocking_lookup = SyncFnResolver::new(|id: &str| {
            if id == PARTNER_XYZ {
                Ok(SecretKey::from(PARTNER_XYZ_KEY))
            } else {
                Err(ResolveError::UnknownIntegration(id.to_owned()))
            }
        });
        assert_eq!(
            validate(&token, &booking_body(), &blocking_lookup, 300_000).await,
            Ok(true)
        );
    }

    #[tokio::test]
    async fn test_should_report_resolver_timeout_as_unavailable() {
        let slow = Arc::new(SlowKeyStore::with_partner_keys(Duration::from_secs(5)));
        let timed = FnResolver::new(move |id: String| {
            let slow = Arc::clone(&slow);
            async move {
                tokio::time::timeout(Duration::from_millis(20), slow.resolve(&id))
                    .await
                    .unwrap_or_else(|_| {
                        Err(ResolveError::Unavailable("lookup timed out".to_owned()))
                    })
            }
        });
        let token = generate(&booking_body(), PARTNER_XYZ, PARTNER_XYZ_KEY).unwrap();

        let result = validate(&token, &booking_body(), &timed, 300_000).await;
        assert_eq!(
            result,
            Err(ResolveError::Unavailable("lookup timed out".to_owned()))
        );
    }
}
