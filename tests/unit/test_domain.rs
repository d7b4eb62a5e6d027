use blogim_api::domain::{
    review::moderation::{Disposition, ModerationThresholds},
    shared::pagination::{MAX_PAGE_SIZE, PaginatedResponse, PaginationRequest},
    user::entity::ANONYMOUS_USER_ID,
};

#[test]
fn thresholds_reject_inverted_or_non_positive_values() {
    assert!(ModerationThresholds::new(3, 10).is_ok());
    assert!(ModerationThresholds::new(10, 3).is_err());
    assert!(ModerationThresholds::new(5, 5).is_err());
    assert!(ModerationThresholds::new(0, 4).is_err());
}

#[test]
fn custom_thresholds_move_the_boundaries() {
    let t = ModerationThresholds::new(5, 6).expect("valid thresholds");
    assert_eq!(t.classify(4), Disposition::Accept);
    assert_eq!(t.classify(5), Disposition::Flag);
    assert_eq!(t.classify(6), Disposition::Block);
}

#[test]
fn only_accepted_reviews_carry_no_reason() {
    let reasons = vec!["urls: 2 matches".to_string()];
    assert_eq!(Disposition::Accept.flag_reason(&reasons), None);
    assert_eq!(
        Disposition::Flag.flag_reason(&reasons).as_deref(),
        Some("Spam detected: urls: 2 matches")
    );
    assert_eq!(
        Disposition::Block.flag_reason(&reasons).as_deref(),
        Some("High spam score: urls: 2 matches")
    );
}

#[test]
fn pagination_defaults_are_safe_and_stable() {
    let p = PaginationRequest::default();
    assert_eq!(p.page, 1);
    assert_eq!(p.limit, 50);
    assert_eq!(p.offset(), 0);
}

#[test]
fn pagination_clamps_out_of_range_values() {
    let p = PaginationRequest {
        page: 0,
        limit: 10_000,
    }
    .normalized();
    assert_eq!(p.page, 1);
    assert_eq!(p.limit, MAX_PAGE_SIZE);

    let third = PaginationRequest { page: 3, limit: 20 };
    assert_eq!(third.offset(), 40);
}

#[test]
fn paginated_response_reports_neighbours() {
    let page: PaginatedResponse<u8> =
        PaginatedResponse::new(vec![1, 2], 5, PaginationRequest { page: 2, limit: 2 });
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next_page);
    assert!(page.has_prev_page);
}

#[test]
fn anonymous_user_is_the_nil_uuid() {
    assert!(ANONYMOUS_USER_ID.is_nil());
}
