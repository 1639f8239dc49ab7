use shop_navigator::{
    catalog::{self, find, is_root, match_pattern},
    models::{View, Visibility},
};
use std::collections::HashSet;

// --- Path Surface ---

#[test]
fn test_catalog_matches_published_path_table() {
    // Links and redirects elsewhere in the storefront depend on these exact literals.
    let expected = [
        ("/signup", View::Signup, Visibility::Public),
        ("/login", View::Login, Visibility::Public),
        ("/verify-otp", View::VerifyOtp, Visibility::Public),
        ("/forgot-password", View::ForgotPassword, Visibility::Public),
        (
            "/reset-password/:userId/:passwordResetToken",
            View::ResetPassword,
            Visibility::Public,
        ),
        ("/product-details/:id", View::ProductDetails, Visibility::RequiresAuth),
        ("/logout", View::Logout, Visibility::RequiresAuth),
        ("/admin/dashboard", View::AdminDashboard, Visibility::RequiresAdmin),
        ("/admin/product-update/:id", View::ProductUpdate, Visibility::RequiresAdmin),
        ("/admin/add-product", View::AddProduct, Visibility::RequiresAdmin),
        ("/admin/orders", View::AdminOrders, Visibility::RequiresAdmin),
        ("/home", View::Home, Visibility::RequiresNonAdmin),
        ("/cart", View::Cart, Visibility::RequiresNonAdmin),
        ("/profile", View::Profile, Visibility::RequiresNonAdmin),
        ("/checkout", View::Checkout, Visibility::RequiresNonAdmin),
        ("/order-success/:id", View::OrderSuccess, Visibility::RequiresNonAdmin),
        ("/orders", View::UserOrders, Visibility::RequiresNonAdmin),
        ("/wishlist", View::Wishlist, Visibility::RequiresNonAdmin),
    ];

    let actual: Vec<_> = catalog::catalog()
        .iter()
        .map(|r| (r.path, r.view, r.visibility))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_catalog_paths_and_views_are_unique() {
    let paths: HashSet<_> = catalog::catalog().iter().map(|r| r.path).collect();
    let views: HashSet<_> = catalog::catalog().iter().map(|r| r.view).collect();
    assert_eq!(paths.len(), catalog::catalog().len());
    assert_eq!(views.len(), catalog::catalog().len());
    assert!(!views.contains(&View::NotFound));
}

// --- Matching ---

#[test]
fn test_match_static_path() {
    assert_eq!(match_pattern("/cart", "/cart").map(|p| p.len()), Some(0));
    assert!(match_pattern("/cart", "/carts").is_none());
    assert!(match_pattern("/cart", "/cart/1").is_none());
}

#[test]
fn test_match_ignores_query_fragment_and_trailing_slash() {
    assert!(match_pattern("/checkout", "/checkout?step=2").is_some());
    assert!(match_pattern("/checkout", "/checkout#summary").is_some());
    assert!(match_pattern("/checkout", "/checkout/").is_some());
    assert!(match_pattern("/checkout", "/checkout//").is_none());
}

#[test]
fn test_match_is_case_insensitive_for_static_segments() {
    assert!(match_pattern("/admin/dashboard", "/Admin/DASHBOARD").is_some());

    let params = match_pattern("/order-success/:id", "/ORDER-SUCCESS/AbC").unwrap();
    // Parameter values keep their case.
    assert_eq!(params["id"], "AbC");
}

#[test]
fn test_match_params_require_non_empty_segment() {
    assert!(match_pattern("/product-details/:id", "/product-details/").is_none());
    let params = match_pattern("/product-details/:id", "/product-details/65ab12?ref=home").unwrap();
    assert_eq!(params["id"], "65ab12");
}

#[test]
fn test_match_percent_decodes_params() {
    let params = match_pattern("/product-details/:id", "/product-details/a%20b").unwrap();
    assert_eq!(params["id"], "a b");

    let params = match_pattern(
        "/reset-password/:userId/:passwordResetToken",
        "/reset-password/u%2F1/t%C3%A9st",
    )
    .unwrap();
    assert_eq!(params["userId"], "u/1");
    assert_eq!(params["passwordResetToken"], "tést");
}

#[test]
fn test_match_keeps_undecodable_param_raw() {
    let params = match_pattern("/order-success/:id", "/order-success/%FF%FE").unwrap();
    assert_eq!(params["id"], "%FF%FE");
}

#[test]
fn test_match_accepts_path_without_leading_slash() {
    assert!(match_pattern("/wishlist", "wishlist").is_some());
}

#[test]
fn test_root_detection() {
    assert!(is_root("/"));
    assert!(is_root(""));
    assert!(is_root("/?next=/cart"));
    assert!(!is_root("/home"));
}

#[test]
fn test_find_returns_first_match_in_order() {
    let (route, params) = find(catalog::catalog(), "/admin/product-update/9").unwrap();
    assert_eq!(route.view, View::ProductUpdate);
    assert_eq!(params["id"], "9");
    assert!(find(catalog::catalog(), "/admin/unknown").is_none());
}
