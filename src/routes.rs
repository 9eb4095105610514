// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const CUSTOMERS: &str = "/customers";
pub const CUSTOMER_ITEM: &str = "/customers/{id}";
