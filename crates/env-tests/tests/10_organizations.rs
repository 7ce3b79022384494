//! Flow Tests: Organization Bulk-Create
//!
//! Creates a small fixed hierarchy through the bulk endpoint, then fetches
//! each organization back and cross-checks the parent/child relationship.
//! These requests are not retried: the service is expected to be up once
//! the smoke tests have passed.

#![cfg(feature = "flows")]

use env_tests::env::TestEnv;
use env_tests::fixtures::org_client::{CreateOrganizationRequest, OrgClient};
use serial_test::serial;

const ROOT_ORG_ID: i64 = 1;
const CHILD_ORG_ID: i64 = 2;

#[tokio::test]
#[serial]
async fn bulk_create_two_organizations_and_verify_hierarchy() {
    let env = TestEnv::from_env();
    let client = OrgClient::new(env.base_url());

    let request = vec![
        CreateOrganizationRequest::root(ROOT_ORG_ID, "Organization 1"),
        CreateOrganizationRequest::child(CHILD_ORG_ID, "Organization 2", ROOT_ORG_ID),
    ];

    let response = client
        .bulk_create(&request)
        .await
        .expect("bulk create should succeed with 200 or 201");

    assert_eq!(
        response.status, "SUCCESS",
        "bulk create reported {}: {}",
        response.status, response.message
    );
    assert_eq!(
        response.org_ids.len(),
        2,
        "expected exactly 2 organization ids, got {:?}",
        response.org_ids
    );

    for org_id in &response.org_ids {
        let org = client
            .get_organization(*org_id)
            .await
            .expect("created organization should be fetchable");

        let id = org.id.expect("organization id should be present");
        assert!(!org.name.is_empty(), "organization {id} has an empty name");

        if id == CHILD_ORG_ID {
            assert_eq!(
                org.parent_id,
                Some(ROOT_ORG_ID),
                "organization {CHILD_ORG_ID} should report parent {ROOT_ORG_ID}"
            );
        }
    }
}
