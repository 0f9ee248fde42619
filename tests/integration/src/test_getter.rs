//! Getter integration tests against a running store.

#[cfg(test)]
mod tests {
    use tablekit_core::Getter;

    use crate::{cleanup_table, create_test_table, dynamodb_client, store};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_read_projected_item() {
        let sdk = dynamodb_client();
        let table = create_test_table(&sdk, "get-proj").await;
        let store = store();

        store
            .updater(&table, [("pk", "user#1")])
            .unwrap()
            .item([("email", "ada@example.com"), ("name", "Ada"), ("role", "admin")])
            .execute()
            .await
            .unwrap();

        let out = Getter::new(&store, &table, [("pk", "user#1")])
            .unwrap()
            .projection("email")
            .projections(["name"])
            .strong()
            .execute()
            .await
            .unwrap();

        let item = out.item.unwrap();
        assert_eq!(item.len(), 2);
        assert_eq!(item["email"].as_s(), Some("ada@example.com"));
        assert_eq!(item["name"].as_s(), Some("Ada"));

        cleanup_table(&sdk, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_none_for_missing_item() {
        let sdk = dynamodb_client();
        let table = create_test_table(&sdk, "get-missing").await;

        let out = store()
            .getter(&table, [("pk", "nobody")])
            .unwrap()
            .execute()
            .await
            .unwrap();
        assert!(out.item.is_none());

        cleanup_table(&sdk, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_batch_read_items() {
        let sdk = dynamodb_client();
        let table = create_test_table(&sdk, "get-batch").await;
        let store = store();

        for pk in ["a", "b", "c"] {
            store
                .updater(&table, [("pk", pk)])
                .unwrap()
                .item([("v", pk)])
                .execute()
                .await
                .unwrap();
        }

        let out = store
            .batch_getter(&table, vec![[("pk", "a")], [("pk", "c")]])
            .unwrap()
            .execute()
            .await
            .unwrap();

        let mut found: Vec<&str> = out.responses[&table]
            .iter()
            .filter_map(|item| item["v"].as_s())
            .collect();
        found.sort_unstable();
        assert_eq!(found, ["a", "c"]);

        cleanup_table(&sdk, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_surface_missing_table() {
        let err = store()
            .getter("table-that-does-not-exist", [("pk", "a")])
            .unwrap()
            .execute()
            .await
            .unwrap_err();
        assert_eq!(
            err.code,
            tablekit_model::error::ErrorCode::ResourceNotFoundException
        );
    }
}
