pub mod auth;
pub mod payment;
pub mod prompt;
pub mod reservation;

pub use auth::{AuthProvider, NoAuth, StaticToken};
pub use payment::{PaymentError, PaymentGateway, RedirectHandoff};
pub use prompt::UserPrompt;
pub use reservation::{
    BackendFault, CheckoutCallbacks, PaymentSession, ReservationGateway, ReservationLock,
    ReserveError, SESSION_ID_PLACEHOLDER,
};
