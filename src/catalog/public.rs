use crate::models::{RouteDef, View, Visibility::Public};

/// Public Route Group
///
/// Account entry points reachable by anyone once the initial auth check has resolved:
/// registration, login, OTP verification and the password-reset flow.
///
/// These are still withheld while the check is pending (see `authorizer::should_mount_router`),
/// so a signed-in visitor never sees the login form flash before being redirected.
pub const ROUTES: &[RouteDef] = &[
    RouteDef::new("/signup", View::Signup, Public),
    RouteDef::new("/login", View::Login, Public),
    RouteDef::new("/verify-otp", View::VerifyOtp, Public),
    RouteDef::new("/forgot-password", View::ForgotPassword, Public),
    // Link delivered by the password-reset email.
    RouteDef::new(
        "/reset-password/:userId/:passwordResetToken",
        View::ResetPassword,
        Public,
    ),
];
