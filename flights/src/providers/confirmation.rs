//! Confirmation host trait and dialog contracts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A dialog the workflow can open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dialog {
    /// Blocking seasonal service notice.
    SeasonalNotice {
        /// Message shown to the user.
        message: String,
    },

    /// Post-midnight departure confirmation.
    EarlyFlight {
        /// Flight number of the early journey.
        flight_number: String,
        /// Departure of the early journey.
        departure: NaiveDateTime,
    },

    /// Club membership upsell.
    ClubUpsell,

    /// Insufficient loyalty points recovery.
    InsufficientPoints {
        /// Points the selections require.
        points_required: i64,
        /// The user's current balance.
        point_balance: i64,
        /// Whether the booking is in points-plus-cash mode.
        is_point_plus_cash: bool,
        /// Whether switching flights could still fit the balance.
        is_change_flight: bool,
    },

    /// Modify-flight entry dialog.
    ModifyFlight,
}

/// The user's choice in the club upsell dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubUpsellResponse {
    /// Signup credential entered by a newly enrolling member.
    pub password: Option<String>,

    /// The logged-in user is already a club member on this booking.
    pub logged_in_person_on_booking: bool,

    /// The user logged in as an existing club member during the dialog.
    pub logged_in_as_club: bool,
}

/// The user's choice in the insufficient-points dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsufficientPointsResponse {
    /// The user refreshed their balance; apply this value and stay in
    /// points mode.
    pub updated_balance: Option<i64>,

    /// Proceed with the purchase anyway.
    pub continue_anyway: bool,

    /// Switch the selections to points-plus-cash fares.
    pub switch_to_point_cash: bool,
}

/// A response emitted by a dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DialogResponse {
    /// Yes/no confirmation (early flight).
    Confirmed(bool),

    /// Club upsell choice.
    ClubUpsell(ClubUpsellResponse),

    /// Insufficient points choice.
    InsufficientPoints(InsufficientPointsResponse),
}

/// Confirmation host.
///
/// Abstracts the modal UI layer. `open` presents the dialog and resolves
/// with the user's single response; the workflow suspends on it and acts
/// on at most one resolution. `None` means the dialog was dismissed
/// without a usable response, which aborts the sub-workflow without
/// raising an error.
pub trait ConfirmationHost: Send + Sync {
    /// Open a dialog and wait for its single response.
    fn open(
        &self,
        dialog: Dialog,
    ) -> impl std::future::Future<Output = Option<DialogResponse>> + Send;
}
