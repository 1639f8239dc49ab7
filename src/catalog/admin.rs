use crate::models::{RouteDef, View, Visibility::RequiresAdmin};

/// Admin Route Group
///
/// Store management pages. Only present in the navigable set for administrators;
/// for everyone else these paths fall through to the NotFound page.
pub const ROUTES: &[RouteDef] = &[
    RouteDef::new("/admin/dashboard", View::AdminDashboard, RequiresAdmin),
    RouteDef::new("/admin/product-update/:id", View::ProductUpdate, RequiresAdmin),
    RouteDef::new("/admin/add-product", View::AddProduct, RequiresAdmin),
    RouteDef::new("/admin/orders", View::AdminOrders, RequiresAdmin),
];
