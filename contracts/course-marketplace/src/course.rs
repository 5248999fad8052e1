/*!
 * Course Record
 *
 * One course's metadata and listed price under single-owner control. Records
 * are created once, by a purchase, and never removed. Every mutation goes
 * through a method here so the owner check and the field validation stay in
 * one place; the contract layer only loads, calls, persists and publishes.
 */

use soroban_sdk::{contracttype, Address, Env, String};

use crate::storage::is_zero_address;
use crate::types::Error;

/// A single course listing.
///
/// # Invariants
/// - `owner` is never the zero address
/// - `title`, `slug`, `description` and `category` are never empty
/// - `price` is never negative; zero marks a free listing
/// - `created_at` is fixed at creation and used by clients for ordering
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Course {
    /// The only address allowed to edit or transfer this course
    pub owner: Address,

    pub title: String,

    /// URL-friendly identifier chosen by the creator
    pub slug: String,

    pub description: String,

    pub category: String,

    /// Listed sale price, in the payment token's base unit.
    /// Distinct from the marketplace fee paid to create the course.
    pub price: i128,

    /// Ledger timestamp (seconds) at creation
    pub created_at: u64,
}

impl Course {
    /// Builds a new course stamped with the current ledger time.
    ///
    /// # Errors
    /// - InvalidOwner: `owner` is the zero address
    /// - EmptyTitle / EmptySlug / EmptyDescription / EmptyCategory
    /// - InvalidPrice: negative listed price
    pub fn new(
        env: &Env,
        owner: Address,
        title: String,
        slug: String,
        description: String,
        category: String,
        price: i128,
    ) -> Result<Self, Error> {
        if is_zero_address(env, &owner) {
            return Err(Error::InvalidOwner);
        }
        non_empty(&title, Error::EmptyTitle)?;
        non_empty(&slug, Error::EmptySlug)?;
        non_empty(&description, Error::EmptyDescription)?;
        non_empty(&category, Error::EmptyCategory)?;
        valid_price(price)?;

        Ok(Course {
            owner,
            title,
            slug,
            description,
            category,
            price,
            created_at: env.ledger().timestamp(),
        })
    }

    pub fn ensure_owner(&self, caller: &Address) -> Result<(), Error> {
        if *caller != self.owner {
            return Err(Error::NotCourseOwner);
        }
        Ok(())
    }

    /// Batched read of everything a listing page renders.
    pub fn details(&self) -> (String, String, String, String, i128) {
        (
            self.title.clone(),
            self.slug.clone(),
            self.description.clone(),
            self.category.clone(),
            self.price,
        )
    }

    // The setters below return the value they replaced so the caller can
    // publish an (old, new) event.

    pub fn set_title(&mut self, new_title: String) -> Result<String, Error> {
        non_empty(&new_title, Error::EmptyTitle)?;
        Ok(core::mem::replace(&mut self.title, new_title))
    }

    pub fn set_slug(&mut self, new_slug: String) -> Result<String, Error> {
        non_empty(&new_slug, Error::EmptySlug)?;
        Ok(core::mem::replace(&mut self.slug, new_slug))
    }

    pub fn set_description(&mut self, new_description: String) -> Result<String, Error> {
        non_empty(&new_description, Error::EmptyDescription)?;
        Ok(core::mem::replace(&mut self.description, new_description))
    }

    pub fn set_category(&mut self, new_category: String) -> Result<String, Error> {
        non_empty(&new_category, Error::EmptyCategory)?;
        Ok(core::mem::replace(&mut self.category, new_category))
    }

    pub fn set_price(&mut self, new_price: i128) -> Result<i128, Error> {
        valid_price(new_price)?;
        Ok(core::mem::replace(&mut self.price, new_price))
    }

    /// Hands the course to `new_owner` and returns the previous owner.
    pub fn transfer_ownership(&mut self, env: &Env, new_owner: Address) -> Result<Address, Error> {
        if is_zero_address(env, &new_owner) {
            return Err(Error::InvalidOwner);
        }
        Ok(core::mem::replace(&mut self.owner, new_owner))
    }
}

fn non_empty(value: &String, err: Error) -> Result<(), Error> {
    if value.len() == 0 {
        return Err(err);
    }
    Ok(())
}

fn valid_price(price: i128) -> Result<(), Error> {
    if price < 0 {
        return Err(Error::InvalidPrice);
    }
    Ok(())
}
