//! Concurrent verification tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use serde_json::json;
    use xsignature_auth::{SecretResolver, generate, validate};

    use crate::{PARTNER_XYZ, PARTNER_XYZ_KEY, SlowKeyStore};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_verify_many_tokens_concurrently() {
        let store: Arc<dyn SecretResolver> =
            Arc::new(SlowKeyStore::with_partner_keys(Duration::from_millis(20)));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let body = json!({"request": i, "items": [i, i + 1]});
                    let token = generate(&body, PARTNER_XYZ, PARTNER_XYZ_KEY).unwrap();
                    let genuine = validate(&token, &body, store.as_ref(), 300_000).await;
                    let tampered =
                        validate(&token, &json!({"request": i + 1}), store.as_ref(), 300_000).await;
                    (genuine, tampered)
                })
            })
            .collect();

        for result in futures::future::join_all(handles).await {
            let (genuine, tampered) = result.unwrap();
            assert_eq!(genuine, Ok(true));
            assert_eq!(tampered, Ok(false));
        }
    }

    #[tokio::test]
    async fn test_should_not_serialize_verifications_behind_slow_lookups() {
        let store = SlowKeyStore::with_partner_keys(Duration::from_millis(100));
        let body = json!({"userId": "12345"});
        let token = generate(&body, PARTNER_XYZ, PARTNER_XYZ_KEY).unwrap();

        let started = Instant::now();
        let outcomes = futures::future::join_all(
            (0..10).map(|_| validate(&token, &body, &store, 300_000)),
        )
        .await;
        let elapsed = started.elapsed();

        assert!(outcomes.iter().all(|o| *o == Ok(true)));
        assert_eq!(store.lookups(), 10);
        // Ten sequential lookups would take a full second.
        assert!(elapsed < Duration::from_millis(900), "took {elapsed:?}");
    }
}
