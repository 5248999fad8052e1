/*!
 * Type Definitions for the Course Marketplace Contract
 *
 * Storage keys, the error taxonomy and the event topics shared by the
 * marketplace entry points and the course record logic.
 */

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, Symbol};

// ================================================================================================
// STORAGE KEYS
// ================================================================================================

/// Keys for every entry the contract writes.
///
/// Configuration and the admin list live in instance storage and share the
/// contract's lifetime. Course records and per-buyer registries are unbounded,
/// so each gets its own persistent entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Marketplace owner (instance)
    Owner,

    /// Token contract used to pay the fee (instance)
    PaymentToken,

    /// Current course-creation fee (instance)
    Price,

    /// Ordered admin list, compacted on removal (instance)
    Admins,

    /// Number of courses created so far, also the next course id (instance)
    CourseCount,

    /// Set while a value-moving entry point is executing (instance)
    Locked,

    /// One course record per id (persistent)
    Course(u64),

    /// Course ids bought by a given address, in purchase order (persistent)
    UserCourses(Address),
}

// ================================================================================================
// ERROR DEFINITIONS
// ================================================================================================

/// Every way a marketplace or course call can be rejected.
///
/// # Error Code Ranges
/// - 1-3: Authorization
/// - 4-8: Address and admin-set validation
/// - 9-15: Value and input validation
/// - 16-20: Funds, transfers and execution state
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ========== Authorization (1-3) ==========

    /// Caller is not the marketplace owner
    NotOwner = 1,

    /// Caller is neither the marketplace owner nor an admin
    NotAuthorized = 2,

    /// Caller does not own the course being modified
    NotCourseOwner = 3,

    // ========== Address and admin-set validation (4-8) ==========

    /// The zero address was supplied where a real account is required
    InvalidAddress = 4,

    /// An owner (marketplace or course) would become the zero address
    InvalidOwner = 5,

    /// Address is already an admin
    AlreadyAdmin = 6,

    /// Address is not an admin
    NotAdmin = 7,

    /// No course exists under the requested id
    CourseNotFound = 8,

    // ========== Value and input validation (9-15) ==========

    /// Fee must be greater than zero; listed prices must not be negative
    InvalidPrice = 9,

    /// Insufficient payment sent for course purchase
    InsufficientPayment = 10,

    /// Title cannot be empty
    EmptyTitle = 11,

    /// Slug cannot be empty
    EmptySlug = 12,

    /// Description cannot be empty
    EmptyDescription = 13,

    /// Category cannot be empty
    EmptyCategory = 14,

    /// Start must be less than end
    InvalidRange = 15,

    // ========== Funds, transfers and execution state (16-20) ==========

    /// End index out of bounds
    IndexOutOfBounds = 16,

    /// No funds to withdraw
    NoFundsToWithdraw = 17,

    /// Direct transfers not allowed
    DirectTransferNotAllowed = 18,

    /// A guarded entry point was entered while another was still running
    ReentrantCall = 19,
}

// ================================================================================================
// EVENT CONSTANTS
// ================================================================================================

/// Course title changed. Topics: (symbol, course_id). Data: (old, new)
pub const TITLE_UPDATED: Symbol = symbol_short!("title_upd");

/// Course slug changed. Topics: (symbol, course_id). Data: (old, new)
pub const SLUG_UPDATED: Symbol = symbol_short!("slug_upd");

/// Course description changed. Topics: (symbol, course_id). Data: (old, new)
pub const DESCRIPTION_UPDATED: Symbol = symbol_short!("desc_upd");

/// Course category changed. Topics: (symbol, course_id). Data: (old, new)
pub const CATEGORY_UPDATED: Symbol = symbol_short!("cat_upd");

/// Course listed price changed. Topics: (symbol, course_id). Data: (old, new)
pub const COURSE_PRICE_UPDATED: Symbol = symbol_short!("cprice_up");

/// Course changed hands. Topics: (symbol, course_id). Data: (old_owner, new_owner)
pub const COURSE_OWNERSHIP_TRANSFERRED: Symbol = symbol_short!("crs_own");

/// Admin granted. Topics: (symbol,). Data: admin
pub const ADMIN_ADDED: Symbol = symbol_short!("adm_add");

/// Admin revoked. Topics: (symbol,). Data: admin
pub const ADMIN_REMOVED: Symbol = symbol_short!("adm_rm");

/// Marketplace fee changed. Topics: (symbol,). Data: new_price
pub const PRICE_UPDATED: Symbol = symbol_short!("price_upd");

/// Course purchased. Topics: (symbol, buyer). Data: (course_id, title, description, timestamp)
pub const COURSE_PURCHASED: Symbol = symbol_short!("crs_buy");

/// Fees withdrawn. Topics: (symbol, owner). Data: amount
pub const FUNDS_WITHDRAWN: Symbol = symbol_short!("withdrawn");

/// Marketplace ownership changed. Topics: (symbol,). Data: (old_owner, new_owner)
pub const OWNERSHIP_TRANSFERRED: Symbol = symbol_short!("own_xfer");
