//! Updater integration tests against a running store.

#[cfg(test)]
mod tests {
    use tablekit_model::AttributeValue;

    use crate::{cleanup_table, create_test_table, dynamodb_client, store};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_item_with_audit_timestamps() {
        let sdk = dynamodb_client();
        let table = create_test_table(&sdk, "upd-create").await;
        let store = store();

        let out = store
            .updater(&table, [("pk", "user#1")])
            .unwrap()
            .item([("email", "ada@example.com")])
            .execute()
            .await
            .unwrap();

        assert_eq!(out.attributes["email"].as_s(), Some("ada@example.com"));
        assert!(out.attributes.contains_key("createdAt"));
        assert!(out.attributes.contains_key("updatedAt"));

        cleanup_table(&sdk, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_keep_created_at_on_second_update() {
        let sdk = dynamodb_client();
        let table = create_test_table(&sdk, "upd-keep").await;
        let store = store();

        let mut first = store.updater(&table, [("pk", "user#1")]).unwrap();
        first.created_at("2020-01-01T00:00:00.000Z").unwrap();
        first.item([("n", 1)]).execute().await.unwrap();

        let mut second = store.updater(&table, [("pk", "user#1")]).unwrap();
        second.created_at("2030-01-01T00:00:00.000Z").unwrap();
        let out = second.item([("n", 2)]).execute().await.unwrap();

        assert_eq!(
            out.attributes["createdAt"].as_s(),
            Some("2020-01-01T00:00:00.000Z")
        );
        assert_eq!(out.attributes["n"], AttributeValue::number(2));

        cleanup_table(&sdk, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_increment_rev_and_reject_stale_writes() {
        let sdk = dynamodb_client();
        let table = create_test_table(&sdk, "upd-rev").await;
        let store = store();

        store
            .updater(&table, [("pk", "doc#1")])
            .unwrap()
            .item([("rev", 1)])
            .execute()
            .await
            .unwrap();

        let out = store
            .updater(&table, [("pk", "doc#1")])
            .unwrap()
            .rev(1)
            .item([("title", "draft")])
            .execute()
            .await
            .unwrap();
        assert_eq!(out.attributes["rev"], AttributeValue::number(2));

        let err = store
            .updater(&table, [("pk", "doc#1")])
            .unwrap()
            .rev(1)
            .item([("title", "stale")])
            .execute()
            .await
            .unwrap_err();
        assert!(err.is_conditional_check_failed());

        cleanup_table(&sdk, &table).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_apply_raw_clauses() {
        let sdk = dynamodb_client();
        let table = create_test_table(&sdk, "upd-raw").await;
        let store = store();

        store
            .updater(&table, [("pk", "counter")])
            .unwrap()
            .item([("visits", 1), ("old", 0)])
            .execute()
            .await
            .unwrap();

        let out = store
            .updater(&table, [("pk", "counter")])
            .unwrap()
            .add("#visits :one")
            .remove("#old")
            .names([("#visits", "visits"), ("#old", "old")])
            .values([(":one", 1)])
            .execute()
            .await
            .unwrap();

        assert_eq!(out.attributes["visits"], AttributeValue::number(2));
        assert!(!out.attributes.contains_key("old"));

        cleanup_table(&sdk, &table).await;
    }
}
