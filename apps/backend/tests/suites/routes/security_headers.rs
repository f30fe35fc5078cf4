use actix_web::test;

use crate::common::header_str;
use crate::support::{build_test_state, create_test_app, test_settings};

#[actix_web::test]
async fn responses_carry_security_headers() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    let headers = resp.headers();

    assert_eq!(header_str(headers, "x-content-type-options"), "nosniff");
    assert_eq!(header_str(headers, "x-frame-options"), "DENY");
    assert!(header_str(headers, "content-security-policy").contains("default-src 'none'"));
    assert!(headers.get("strict-transport-security").is_some());
    assert_eq!(header_str(headers, "cache-control"), "no-store");
}

#[actix_web::test]
async fn root_is_cacheable() {
    let settings = test_settings();
    let app = create_test_app(build_test_state(&settings).await, &settings).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(header_str(resp.headers(), "x-frame-options"), "DENY");
    assert!(resp.headers().get("cache-control").is_none());
}
