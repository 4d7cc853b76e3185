//! Behaviour coverage for add, delete, and logout operations.

use chrono::Utc;
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    BlobStoreError, FixtureBlobStore, MockBlobStore, MockUserDocuments,
};
use crate::domain::{BlobRef, ErrorCode};

fn service(
    documents: MockUserDocuments,
    blobs: MockBlobStore,
) -> RosterService<MockUserDocuments, MockBlobStore> {
    RosterService::new(Arc::new(documents), Arc::new(blobs))
}

fn stored_user(id: &UserId, employee_id: &str) -> User {
    User {
        id: id.clone(),
        employee_id: EmployeeId::new(employee_id).expect("valid employee id"),
        name: "Jo".into(),
        trade: "Elec".into(),
        image_url: String::new(),
        expo_push_token: String::new(),
        created_at: Utc::now(),
    }
}

fn add_request(employee_id: &str, name: &str, trade: &str) -> AddUserRequest {
    AddUserRequest {
        employee_id: employee_id.into(),
        name: name.into(),
        trade: trade.into(),
    }
}

mod add_user {
    use super::*;

    #[tokio::test]
    async fn stores_a_normalised_record_with_a_fresh_id() {
        let mut documents = MockUserDocuments::new();
        documents
            .expect_find_by_employee_id()
            .withf(|employee_id| employee_id.as_ref() == "B2")
            .times(1)
            .returning(|_| Ok(Vec::new()));
        documents
            .expect_insert_unique()
            .withf(|new_user| {
                new_user.employee_id.as_ref() == "B2"
                    && new_user.name == "Kim"
                    && new_user.trade == "Plumb"
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: new_user.id,
                    employee_id: new_user.employee_id,
                    name: new_user.name,
                    trade: new_user.trade,
                    image_url: String::new(),
                    expo_push_token: String::new(),
                    created_at: Utc::now(),
                })
            });

        let service = service(documents, MockBlobStore::new());
        let user = service
            .add_user(add_request("b2", "Kim", "Plumb"))
            .await
            .expect("add succeeds");

        assert_eq!(user.employee_id.as_ref(), "B2");
    }

    #[rstest]
    #[case(add_request("a1", "", "Elec"), "name")]
    #[case(add_request("a1", "Jo", "   "), "trade")]
    #[case(add_request("  ", "Jo", "Elec"), "employeeId")]
    #[tokio::test]
    async fn rejects_missing_fields_without_touching_the_store(
        #[case] request: AddUserRequest,
        #[case] field: &str,
    ) {
        let mut documents = MockUserDocuments::new();
        documents.expect_find_by_employee_id().times(0);
        documents.expect_insert_unique().times(0);

        let service = service(documents, MockBlobStore::new());
        let error = service.add_user(request).await.expect_err("validation");

        assert_eq!(error.code(), ErrorCode::Validation);
        let details = error.details().expect("field details");
        let named = details
            .get("field")
            .and_then(|value| value.as_str())
            .expect("field name");
        assert_eq!(named, field);
    }

    #[tokio::test]
    async fn rejects_duplicates_found_by_the_existence_query() {
        let existing_id = UserId::random();
        let mut documents = MockUserDocuments::new();
        documents
            .expect_find_by_employee_id()
            .times(1)
            .returning(move |_| Ok(vec![stored_user(&existing_id, "B2")]));
        documents.expect_insert_unique().times(0);

        let service = service(documents, MockBlobStore::new());
        // Any casing of the same employee id collides after normalisation.
        let error = service
            .add_user(add_request("b2", "Kim", "Plumb"))
            .await
            .expect_err("duplicate");

        assert_eq!(error.code(), ErrorCode::Duplicate);
    }

    #[tokio::test]
    async fn maps_losing_the_insert_race_to_duplicate() {
        let mut documents = MockUserDocuments::new();
        documents
            .expect_find_by_employee_id()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        documents.expect_insert_unique().times(1).returning(|new_user| {
            Err(UserDocumentsError::duplicate_employee_id(
                new_user.employee_id,
            ))
        });

        let service = service(documents, MockBlobStore::new());
        let error = service
            .add_user(add_request("E1", "Jo", "Elec"))
            .await
            .expect_err("race lost");

        assert_eq!(error.code(), ErrorCode::Duplicate);
    }

    #[tokio::test]
    async fn surfaces_store_failures_as_typed_errors() {
        let mut documents = MockUserDocuments::new();
        documents
            .expect_find_by_employee_id()
            .times(1)
            .returning(|_| Err(UserDocumentsError::connection("backend offline")));

        let service = service(documents, MockBlobStore::new());
        let error = service
            .add_user(add_request("E1", "Jo", "Elec"))
            .await
            .expect_err("store failure");

        assert_eq!(error.code(), ErrorCode::Unavailable);
    }
}

mod delete_user {
    use super::*;

    #[tokio::test]
    async fn removes_the_record_and_its_blob() {
        let id = UserId::random();
        let mut user = stored_user(&id, "A1");
        user.image_url = "images/jo.png".into();

        let mut documents = MockUserDocuments::new();
        documents
            .expect_get()
            .with(eq(id.clone()))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        documents
            .expect_delete()
            .with(eq(id.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_delete()
            .with(eq(BlobRef::new("images/jo.png").expect("valid reference")))
            .times(1)
            .returning(|_| Ok(()));

        let service = service(documents, blobs);
        service.delete_user(&id).await.expect("delete succeeds");
    }

    #[tokio::test]
    async fn blob_cleanup_failure_does_not_block_record_deletion() {
        let id = UserId::random();
        let mut user = stored_user(&id, "A1");
        user.image_url = "images/jo.png".into();

        let mut documents = MockUserDocuments::new();
        documents
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        documents.expect_delete().times(1).returning(|_| Ok(()));

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_delete()
            .times(1)
            .returning(|_| Err(BlobStoreError::not_found("images/jo.png")));

        let service = service(documents, blobs);
        service
            .delete_user(&id)
            .await
            .expect("delete succeeds despite blob failure");
    }

    #[tokio::test]
    async fn records_without_an_image_skip_blob_cleanup() {
        let id = UserId::random();
        let user = stored_user(&id, "A1");

        let mut documents = MockUserDocuments::new();
        documents
            .expect_get()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        documents.expect_delete().times(1).returning(|_| Ok(()));

        let mut blobs = MockBlobStore::new();
        blobs.expect_delete().times(0);

        let service = service(documents, blobs);
        service.delete_user(&id).await.expect("delete succeeds");
    }

    #[tokio::test]
    async fn missing_records_surface_as_not_found() {
        let id = UserId::random();
        let mut documents = MockUserDocuments::new();
        documents.expect_get().times(1).returning(|_| Ok(None));
        documents.expect_delete().times(0);

        let service = service(documents, MockBlobStore::new());
        let error = service.delete_user(&id).await.expect_err("not found");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}

mod log_out_user {
    use super::*;

    #[tokio::test]
    async fn clears_the_push_token() {
        let id = UserId::random();
        let expected = id.clone();
        let mut documents = MockUserDocuments::new();
        documents
            .expect_set_push_token()
            .withf(move |target, token| target == &expected && token.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(documents, MockBlobStore::new());
        service.log_out_user(&id).await.expect("logout succeeds");
    }

    #[tokio::test]
    async fn missing_records_surface_as_not_found() {
        let id = UserId::random();
        let missing = id.clone();
        let mut documents = MockUserDocuments::new();
        documents
            .expect_set_push_token()
            .times(1)
            .returning(move |_, _| Err(UserDocumentsError::not_found(missing.clone())));

        let service = service(documents, MockBlobStore::new());
        let error = service.log_out_user(&id).await.expect_err("not found");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}

#[tokio::test]
async fn fixture_blob_store_composes_with_the_service() {
    let id = UserId::random();
    let user = stored_user(&id, "A1");

    let mut documents = MockUserDocuments::new();
    documents
        .expect_get()
        .times(1)
        .returning(move |_| Ok(Some(user.clone())));
    documents.expect_delete().times(1).returning(|_| Ok(()));

    let service = RosterService::new(Arc::new(documents), Arc::new(FixtureBlobStore));
    service.delete_user(&id).await.expect("delete succeeds");
}
