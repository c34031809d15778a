// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod advisor;
mod catalog;
mod check_digit;
mod contact;
mod forms;
mod identity;
mod observability;
mod orders;
mod session;
mod stats;
mod str_utils;

// This is the public API of the validation library
pub use advisor::{
    Advisor, AdvisorConfig, AdvisorConfigError, Conversation, FaqEntry, FaqSearch, FaqSearchError,
    KeywordRule, Message, Response, ResponseSource, Speaker, StaticFaqs, DEFAULT_FAQ_PREFIX_LENGTH,
    MAX_SUGGESTED_QUESTIONS,
};
pub use catalog::{format_clp, search_products, Category, Product, StoreQuery};
pub use check_digit::compute_run_check_digit as compute_check_digit;
pub use contact::{is_valid_email, AllowedDomains, DomainListError};
pub use forms::{
    Field, FieldErrors, FormConfig, FormLimits, LoginForm, LoginPayload, PasswordRecoveryForm,
    PasswordRecoveryPayload, ProductForm, ProductPayload, RegistrationForm, RegistrationPayload,
    Role, UserForm, UserPayload, DEFAULT_NEW_USER_PASSWORD,
};
pub use identity::{
    format_identity, normalize_identity, validate_identity, IdentityError, Run, ValidationResult,
    ValidationStatus,
};
pub use observability::labels::Labels;
pub use orders::{
    export_file_name, export_orders_csv, format_order_date, search_orders, sort_newest_first,
    Order, OrderItem, OrderStatus, ORDER_CSV_HEADERS, SHIPPING_COST,
};
pub use session::{
    authorize, landing_path, Access, AdminArea, CurrentUser, InMemorySession, KeyValueStore,
    MemoryStore, SessionConfigError, SessionEvent, SessionListener, SessionProvider, SessionSync,
    SessionWatcher, StoreError, StoredSession, SubscriptionId, ADMIN_PATH, HOME_PATH, LOGIN_PATH,
    SESSION_KEY,
};

#[cfg(any(feature = "testing", feature = "bench"))]
pub use crate::check_digit::{ChileanRunChecksum, Validator};
