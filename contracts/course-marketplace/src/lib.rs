/*!
 * Course Marketplace Smart Contract
 *
 * Charges a creation fee for new course listings and keeps the registries of
 * who created what. Key features:
 * - One course record per purchase, owned and edited by its buyer
 * - Global and per-buyer course registries in purchase order
 * - Owner-managed admin allowlist that may adjust the fee
 * - Exact-fee settlement: any overpayment is refunded in the same call
 *
 * Security features:
 * - Explicit caller addresses with `require_auth` on every mutating call
 * - Reentrancy lock around every entry point that moves funds
 * - Registry writes happen before any token transfer
 * - Plain transfers into the contract are refused
 *
 * Business Logic:
 * 1. A buyer calls `purchase_course` sending at least the current fee
 * 2. The contract records a new course owned by the buyer and indexes it
 * 3. The fee stays in the contract and the excess goes back to the buyer
 * 4. The owner withdraws accumulated fees
 */

#![no_std]

mod course;
mod guard;
mod storage;
mod types;

#[cfg(test)]
mod test_course;

use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, token, Address, Env, String, Vec,
};

use guard::ReentrancyGuard;
use storage::{
    extend_instance_ttl, is_zero_address, read_admins, read_course, read_course_count,
    read_owner, read_payment_token, read_price, read_user_courses, write_admins, write_course,
    write_course_count, write_owner, write_payment_token, write_price, write_user_courses,
};

pub use course::Course;
pub use types::{
    DataKey, Error, ADMIN_ADDED, ADMIN_REMOVED, CATEGORY_UPDATED, COURSE_OWNERSHIP_TRANSFERRED,
    COURSE_PRICE_UPDATED, COURSE_PURCHASED, DESCRIPTION_UPDATED, FUNDS_WITHDRAWN,
    OWNERSHIP_TRANSFERRED, PRICE_UPDATED, SLUG_UPDATED, TITLE_UPDATED,
};

#[contract]
pub struct CourseMarketplaceContract;

#[contractimpl]
impl CourseMarketplaceContract {
    /// Deploys the marketplace.
    ///
    /// # Arguments
    /// * `owner` - Receives withdrawals and manages admins
    /// * `payment_token` - Token contract the fee is paid in
    /// * `initial_price` - Course creation fee, must be positive
    ///
    /// Deployment aborts with `InvalidOwner` or `InvalidPrice`.
    pub fn __constructor(env: Env, owner: Address, payment_token: Address, initial_price: i128) {
        if is_zero_address(&env, &owner) {
            panic_with_error!(&env, Error::InvalidOwner);
        }
        if initial_price <= 0 {
            panic_with_error!(&env, Error::InvalidPrice);
        }

        write_owner(&env, &owner);
        write_payment_token(&env, &payment_token);
        write_price(&env, initial_price);
        write_admins(&env, &Vec::new(&env));
        write_course_count(&env, 0);

        extend_instance_ttl(&env);
    }

    // ================================================================================================
    // OWNERSHIP
    // ================================================================================================

    pub fn get_owner(env: Env) -> Address {
        read_owner(&env)
    }

    /// Hands marketplace ownership to `new_owner`.
    ///
    /// # Errors
    /// - NotOwner: `caller` is not the current owner
    /// - InvalidOwner: `new_owner` is the zero address
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        Self::_require_owner(&env, &caller)?;
        if is_zero_address(&env, &new_owner) {
            return Err(Error::InvalidOwner);
        }

        write_owner(&env, &new_owner);
        env.events()
            .publish((OWNERSHIP_TRANSFERRED,), (caller, new_owner));
        Ok(())
    }

    // ================================================================================================
    // ADMIN MANAGEMENT
    // ================================================================================================

    /// Grants admin rights to `admin`.
    ///
    /// Admins may change the fee and nothing else.
    ///
    /// # Errors
    /// - NotOwner: `caller` is not the owner
    /// - InvalidAddress: `admin` is the zero address
    /// - AlreadyAdmin: `admin` already holds the role
    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        Self::_require_owner(&env, &caller)?;
        if is_zero_address(&env, &admin) {
            return Err(Error::InvalidAddress);
        }

        let mut admins = read_admins(&env);
        if admins.contains(&admin) {
            return Err(Error::AlreadyAdmin);
        }
        admins.push_back(admin.clone());
        write_admins(&env, &admins);

        env.events().publish((ADMIN_ADDED,), admin);
        Ok(())
    }

    /// Revokes admin rights from `admin`.
    ///
    /// The remaining admins keep their relative order.
    ///
    /// # Errors
    /// - NotOwner: `caller` is not the owner
    /// - NotAdmin: `admin` does not hold the role
    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        Self::_require_owner(&env, &caller)?;

        let mut admins = read_admins(&env);
        let index = admins.first_index_of(&admin).ok_or(Error::NotAdmin)?;
        admins.remove(index);
        write_admins(&env, &admins);

        env.events().publish((ADMIN_REMOVED,), admin);
        Ok(())
    }

    pub fn is_admin(env: Env, addr: Address) -> bool {
        read_admins(&env).contains(&addr)
    }

    pub fn get_admins(env: Env) -> Vec<Address> {
        read_admins(&env)
    }

    // ================================================================================================
    // FEE
    // ================================================================================================

    /// Updates the course creation fee. Callable by the owner or any admin.
    ///
    /// # Errors
    /// - NotAuthorized: `caller` is neither owner nor admin
    /// - InvalidPrice: `new_price` is not positive
    pub fn set_price(env: Env, caller: Address, new_price: i128) -> Result<(), Error> {
        caller.require_auth();
        if caller != read_owner(&env) && !read_admins(&env).contains(&caller) {
            return Err(Error::NotAuthorized);
        }
        if new_price <= 0 {
            return Err(Error::InvalidPrice);
        }

        write_price(&env, new_price);
        env.events().publish((PRICE_UPDATED,), new_price);
        Ok(())
    }

    pub fn get_price(env: Env) -> i128 {
        read_price(&env)
    }

    // ================================================================================================
    // PURCHASE
    // ================================================================================================

    /// Creates a new course owned by `buyer` in exchange for the marketplace fee.
    ///
    /// `price` is the course's own listed price and is only stored. The amount
    /// charged is the marketplace fee from `get_price`; `value` is what the buyer
    /// offers to pay and must cover it.
    ///
    /// # Business Flow
    /// 1. Checks `value` against the current fee
    /// 2. Builds the course record (validates every field)
    /// 3. Appends the new id to the global and per-buyer registries
    /// 4. Pulls `value` from the buyer, then refunds `value - fee`
    /// 5. Publishes `crs_buy`
    ///
    /// A failed transfer, including the refund, reverts the whole call.
    ///
    /// # Returns
    /// The id of the new course
    ///
    /// # Errors
    /// - ReentrantCall: another guarded entry point is running
    /// - InsufficientPayment: `value` is below the fee
    /// - EmptyTitle / EmptySlug / EmptyDescription / EmptyCategory
    /// - InvalidPrice: negative listed price
    pub fn purchase_course(
        env: Env,
        buyer: Address,
        title: String,
        slug: String,
        description: String,
        category: String,
        price: i128,
        value: i128,
    ) -> Result<u64, Error> {
        buyer.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;

        let fee = read_price(&env);
        if value < fee {
            log!(&env, "Insufficient payment. Required: {}, Sent: {}", fee, value);
            return Err(Error::InsufficientPayment);
        }

        let course = Course::new(
            &env,
            buyer.clone(),
            title.clone(),
            slug,
            description.clone(),
            category,
            price,
        )?;

        // Registries first, transfers after.
        let course_id = read_course_count(&env);
        write_course(&env, course_id, &course);
        write_course_count(&env, course_id + 1);

        let mut user_courses = read_user_courses(&env, &buyer);
        user_courses.push_back(course_id);
        write_user_courses(&env, &buyer, &user_courses);

        let token = token::Client::new(&env, &read_payment_token(&env));
        let contract = env.current_contract_address();
        token.transfer(&buyer, &contract, &value);

        let excess = value - fee;
        if excess > 0 {
            token.transfer(&contract, &buyer, &excess);
        }

        env.events().publish(
            (COURSE_PURCHASED, buyer),
            (course_id, title, description, course.created_at),
        );
        extend_instance_ttl(&env);

        Ok(course_id)
    }

    // ================================================================================================
    // REGISTRIES
    // ================================================================================================

    /// Every course id in purchase order.
    pub fn get_all_courses(env: Env) -> Vec<u64> {
        Self::_id_range(&env, 0, read_course_count(&env))
    }

    pub fn get_user_courses(env: Env, user: Address) -> Vec<u64> {
        read_user_courses(&env, &user)
    }

    /// Returns course ids in the half-open range `[start, end)`.
    ///
    /// # Errors
    /// - InvalidRange: `start >= end`
    /// - IndexOutOfBounds: `end` is past the number of courses
    pub fn get_courses(env: Env, start: u64, end: u64) -> Result<Vec<u64>, Error> {
        if start >= end {
            return Err(Error::InvalidRange);
        }
        let count = read_course_count(&env);
        if end > count {
            log!(&env, "Range end {} past course count {}", end, count);
            return Err(Error::IndexOutOfBounds);
        }
        Ok(Self::_id_range(&env, start, end))
    }

    pub fn get_course_count(env: Env) -> u64 {
        read_course_count(&env)
    }

    // ================================================================================================
    // FUNDS
    // ================================================================================================

    /// Sends the contract's entire payment token balance to the owner.
    ///
    /// # Returns
    /// The amount withdrawn
    ///
    /// # Errors
    /// - NotOwner: `caller` is not the owner
    /// - ReentrantCall: another guarded entry point is running
    /// - NoFundsToWithdraw: the balance is zero
    pub fn withdraw_funds(env: Env, caller: Address) -> Result<i128, Error> {
        Self::_require_owner(&env, &caller)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let token = token::Client::new(&env, &read_payment_token(&env));
        let contract = env.current_contract_address();
        let balance = token.balance(&contract);
        if balance <= 0 {
            log!(&env, "Withdraw requested with empty balance");
            return Err(Error::NoFundsToWithdraw);
        }

        token.transfer(&contract, &caller, &balance);
        env.events().publish((FUNDS_WITHDRAWN, caller), balance);
        Ok(balance)
    }

    /// Plain transfer entry. Always refused: value only enters through
    /// `purchase_course`. The same policy covers every course record, which
    /// lives in this contract.
    pub fn receive(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        log!(&env, "Rejected direct transfer of {} from {}", amount, from);
        Err(Error::DirectTransferNotAllowed)
    }

    // ================================================================================================
    // COURSE RECORDS
    // ================================================================================================

    /// Returns `(title, slug, description, category, price)` in one read.
    pub fn get_course(env: Env, course_id: u64) -> Result<(String, String, String, String, i128), Error> {
        Ok(Self::_load_course(&env, course_id)?.details())
    }

    pub fn get_title(env: Env, course_id: u64) -> Result<String, Error> {
        Ok(Self::_load_course(&env, course_id)?.title)
    }

    pub fn get_slug(env: Env, course_id: u64) -> Result<String, Error> {
        Ok(Self::_load_course(&env, course_id)?.slug)
    }

    pub fn get_description(env: Env, course_id: u64) -> Result<String, Error> {
        Ok(Self::_load_course(&env, course_id)?.description)
    }

    pub fn get_category(env: Env, course_id: u64) -> Result<String, Error> {
        Ok(Self::_load_course(&env, course_id)?.category)
    }

    pub fn get_course_price(env: Env, course_id: u64) -> Result<i128, Error> {
        Ok(Self::_load_course(&env, course_id)?.price)
    }

    pub fn get_course_owner(env: Env, course_id: u64) -> Result<Address, Error> {
        Ok(Self::_load_course(&env, course_id)?.owner)
    }

    /// Creation timestamp, used by clients to sort listings.
    pub fn created_at(env: Env, course_id: u64) -> Result<u64, Error> {
        Ok(Self::_load_course(&env, course_id)?.created_at)
    }

    pub fn set_title(env: Env, course_id: u64, caller: Address, new_title: String) -> Result<(), Error> {
        let old = Self::_edit_course(&env, course_id, &caller, |c| c.set_title(new_title.clone()))?;
        env.events()
            .publish((TITLE_UPDATED, course_id), (old, new_title));
        Ok(())
    }

    pub fn set_slug(env: Env, course_id: u64, caller: Address, new_slug: String) -> Result<(), Error> {
        let old = Self::_edit_course(&env, course_id, &caller, |c| c.set_slug(new_slug.clone()))?;
        env.events()
            .publish((SLUG_UPDATED, course_id), (old, new_slug));
        Ok(())
    }

    pub fn set_description(
        env: Env,
        course_id: u64,
        caller: Address,
        new_description: String,
    ) -> Result<(), Error> {
        let old = Self::_edit_course(&env, course_id, &caller, |c| {
            c.set_description(new_description.clone())
        })?;
        env.events()
            .publish((DESCRIPTION_UPDATED, course_id), (old, new_description));
        Ok(())
    }

    pub fn set_category(env: Env, course_id: u64, caller: Address, new_category: String) -> Result<(), Error> {
        let old = Self::_edit_course(&env, course_id, &caller, |c| {
            c.set_category(new_category.clone())
        })?;
        env.events()
            .publish((CATEGORY_UPDATED, course_id), (old, new_category));
        Ok(())
    }

    /// Changes the course's listed price. Zero is allowed, negative is not.
    pub fn set_course_price(env: Env, course_id: u64, caller: Address, new_price: i128) -> Result<(), Error> {
        let old = Self::_edit_course(&env, course_id, &caller, |c| c.set_price(new_price))?;
        env.events()
            .publish((COURSE_PRICE_UPDATED, course_id), (old, new_price));
        Ok(())
    }

    /// Hands a course to `new_owner`.
    ///
    /// Only the course record changes hands; the id stays in the first
    /// buyer's registry, which records purchases rather than current holdings.
    ///
    /// # Errors
    /// - CourseNotFound
    /// - NotCourseOwner: `caller` does not own the course
    /// - InvalidOwner: `new_owner` is the zero address
    pub fn transfer_course_ownership(
        env: Env,
        course_id: u64,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), Error> {
        let previous = Self::_edit_course(&env, course_id, &caller, |c| {
            c.transfer_ownership(&env, new_owner.clone())
        })?;
        env.events()
            .publish((COURSE_OWNERSHIP_TRANSFERRED, course_id), (previous, new_owner));
        Ok(())
    }

    // ================================================================================================
    // QUERY FUNCTIONS
    // ================================================================================================

    /// Returns `(owner, payment_token, price, admin_count, course_count)`.
    pub fn get_contract_info(env: Env) -> (Address, Address, i128, u32, u64) {
        (
            read_owner(&env),
            read_payment_token(&env),
            read_price(&env),
            read_admins(&env).len(),
            read_course_count(&env),
        )
    }
}

impl CourseMarketplaceContract {
    fn _require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        if *caller != read_owner(env) {
            return Err(Error::NotOwner);
        }
        Ok(())
    }

    fn _load_course(env: &Env, course_id: u64) -> Result<Course, Error> {
        read_course(env, course_id).ok_or(Error::CourseNotFound)
    }

    /// Loads a course, checks `caller` owns it, applies `edit` and persists the
    /// result. Nothing is written when `edit` fails.
    fn _edit_course<T>(
        env: &Env,
        course_id: u64,
        caller: &Address,
        edit: impl FnOnce(&mut Course) -> Result<T, Error>,
    ) -> Result<T, Error> {
        caller.require_auth();
        let mut course = Self::_load_course(env, course_id)?;
        course.ensure_owner(caller)?;
        let previous = edit(&mut course)?;
        write_course(env, course_id, &course);
        Ok(previous)
    }

    fn _id_range(env: &Env, start: u64, end: u64) -> Vec<u64> {
        let mut ids = Vec::new(env);
        for id in start..end {
            ids.push_back(id);
        }
        ids
    }
}
