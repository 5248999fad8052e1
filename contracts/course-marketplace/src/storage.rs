//! Storage accessors for the course marketplace.
//!
//! Instance entries hold configuration and are bumped together with the
//! contract. Course records and per-buyer registries are persistent and bumped
//! whenever they are written.

use soroban_sdk::{unwrap::UnwrapOptimized, Address, Env, String, Vec};

use crate::course::Course;
use crate::types::DataKey;

/// Number of ledgers in a day (assuming ~5 second close time)
const DAY_IN_LEDGERS: u32 = 17280;

pub(crate) const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const RECORD_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const RECORD_TTL_THRESHOLD: u32 = RECORD_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Strkey of the all-zero ed25519 account, the Stellar null address.
const ZERO_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn is_zero_address(env: &Env, addr: &Address) -> bool {
    *addr == Address::from_string(&String::from_str(env, ZERO_ADDRESS))
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub fn read_owner(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .unwrap_optimized()
}

pub fn write_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn read_payment_token(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .unwrap_optimized()
}

pub fn write_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
}

pub fn read_price(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Price)
        .unwrap_optimized()
}

pub fn write_price(env: &Env, price: i128) {
    env.storage().instance().set(&DataKey::Price, &price);
}

// ---------------------------------------------------------------------------
// Admins
// ---------------------------------------------------------------------------

pub fn read_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Admins)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_admins(env: &Env, admins: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Admins, admins);
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

pub fn read_course_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CourseCount)
        .unwrap_or(0)
}

pub fn write_course_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::CourseCount, &count);
}

pub fn read_course(env: &Env, course_id: u64) -> Option<Course> {
    env.storage().persistent().get(&DataKey::Course(course_id))
}

pub fn write_course(env: &Env, course_id: u64, course: &Course) {
    let key = DataKey::Course(course_id);
    env.storage().persistent().set(&key, course);
    env.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_AMOUNT);
}

pub fn read_user_courses(env: &Env, user: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::UserCourses(user.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn write_user_courses(env: &Env, user: &Address, courses: &Vec<u64>) {
    let key = DataKey::UserCourses(user.clone());
    env.storage().persistent().set(&key, courses);
    env.storage()
        .persistent()
        .extend_ttl(&key, RECORD_TTL_THRESHOLD, RECORD_TTL_AMOUNT);
}
