#![cfg(test)]

use super::*;
use crate::test::{
    funded_buyer, last_event, purchase, s, setup_test_env, topic, zero_address, FEE,
};
use soroban_sdk::{
    testutils::{Address as _, Events, Ledger},
    Address, Env, IntoVal, String, Symbol,
};

fn setup_course() -> (Env, CourseMarketplaceContractClient<'static>, Address, u64) {
    let (env, client, _, token, _) = setup_test_env();
    let creator = funded_buyer(&env, &token);
    let course_id = purchase(&env, &client, &creator, "Solidity Basics", FEE);
    (env, client, creator, course_id)
}

fn count_events(env: &Env, name: Symbol) -> u32 {
    env.events()
        .all()
        .iter()
        .filter(|(_, topics, _)| topic(env, topics, 0) == name)
        .count() as u32
}

#[test]
fn test_new_course_fields() {
    let (env, client, creator, course_id) = setup_course();

    assert_eq!(client.get_course_owner(&course_id), creator);
    assert_eq!(client.get_title(&course_id), s(&env, "Solidity Basics"));
    assert_eq!(client.get_slug(&course_id), s(&env, "rust-basics"));
    assert_eq!(
        client.get_description(&course_id),
        s(&env, "Ownership, borrowing and lifetimes.")
    );
    assert_eq!(client.get_category(&course_id), s(&env, "programming"));
    assert_eq!(client.get_course_price(&course_id), 500);
    assert_eq!(
        client.get_course(&course_id),
        (
            s(&env, "Solidity Basics"),
            s(&env, "rust-basics"),
            s(&env, "Ownership, borrowing and lifetimes."),
            s(&env, "programming"),
            500
        )
    );
}

#[test]
fn test_created_at_follows_ledger_time() {
    let (env, client, _, token, _) = setup_test_env();
    let creator = funded_buyer(&env, &token);

    env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);
    let older = purchase(&env, &client, &creator, "Older", FEE);
    env.ledger().with_mut(|li| li.timestamp = 1_700_000_600);
    let newer = purchase(&env, &client, &creator, "Newer", FEE);

    assert_eq!(client.created_at(&older), 1_700_000_000);
    assert_eq!(client.created_at(&newer), 1_700_000_600);

    // Edits never touch the creation time.
    client.set_title(&older, &creator, &s(&env, "Renamed"));
    assert_eq!(client.created_at(&older), 1_700_000_000);
}

#[test]
fn test_unknown_course() {
    let (env, client, creator, _) = setup_course();

    assert_eq!(client.try_get_course(&42), Err(Ok(Error::CourseNotFound)));
    assert_eq!(client.try_created_at(&42), Err(Ok(Error::CourseNotFound)));
    assert_eq!(
        client.try_set_title(&42, &creator, &s(&env, "Anything")),
        Err(Ok(Error::CourseNotFound))
    );
}

// ------------------------------------------------------------------------------------------------
// Metadata
// ------------------------------------------------------------------------------------------------

#[test]
fn test_set_title() {
    let (env, client, creator, course_id) = setup_course();

    client.set_title(&course_id, &creator, &s(&env, "Advanced Solidity"));

    assert_eq!(count_events(&env, TITLE_UPDATED), 1);
    let (_, topics, data) = last_event(&env);
    assert_eq!(topic(&env, &topics, 0), TITLE_UPDATED);
    let id: u64 = topics.get(1).unwrap().into_val(&env);
    assert_eq!(id, course_id);
    let (old, new): (String, String) = data.into_val(&env);
    assert_eq!(old, s(&env, "Solidity Basics"));
    assert_eq!(new, s(&env, "Advanced Solidity"));

    assert_eq!(client.get_title(&course_id), s(&env, "Advanced Solidity"));
    assert_eq!(client.get_course(&course_id).0, s(&env, "Advanced Solidity"));
}

#[test]
fn test_set_slug_description_category() {
    let (env, client, creator, course_id) = setup_course();

    client.set_slug(&course_id, &creator, &s(&env, "advanced-solidity"));
    let (_, topics, data) = last_event(&env);
    assert_eq!(topic(&env, &topics, 0), SLUG_UPDATED);
    let (old, new): (String, String) = data.into_val(&env);
    assert_eq!(old, s(&env, "rust-basics"));
    assert_eq!(new, s(&env, "advanced-solidity"));

    client.set_description(&course_id, &creator, &s(&env, "A deep dive."));
    let (_, topics, _) = last_event(&env);
    assert_eq!(topic(&env, &topics, 0), DESCRIPTION_UPDATED);

    client.set_category(&course_id, &creator, &s(&env, "blockchain"));
    let (_, topics, _) = last_event(&env);
    assert_eq!(topic(&env, &topics, 0), CATEGORY_UPDATED);

    assert_eq!(
        client.get_course(&course_id),
        (
            s(&env, "Solidity Basics"),
            s(&env, "advanced-solidity"),
            s(&env, "A deep dive."),
            s(&env, "blockchain"),
            500
        )
    );
}

#[test]
fn test_set_course_price() {
    let (env, client, creator, course_id) = setup_course();

    client.set_course_price(&course_id, &creator, &1_200);
    let (_, topics, data) = last_event(&env);
    assert_eq!(topic(&env, &topics, 0), COURSE_PRICE_UPDATED);
    let (old, new): (i128, i128) = data.into_val(&env);
    assert_eq!((old, new), (500, 1_200));
    assert_eq!(client.get_course_price(&course_id), 1_200);

    // Free listings are allowed.
    client.set_course_price(&course_id, &creator, &0);
    assert_eq!(client.get_course_price(&course_id), 0);

    assert_eq!(
        client.try_set_course_price(&course_id, &creator, &-1),
        Err(Ok(Error::InvalidPrice))
    );
    assert_eq!(client.get_course_price(&course_id), 0);
}

#[test]
fn test_setters_reject_empty_values() {
    let (env, client, creator, course_id) = setup_course();
    let empty = s(&env, "");

    assert_eq!(
        client.try_set_title(&course_id, &creator, &empty),
        Err(Ok(Error::EmptyTitle))
    );
    assert_eq!(
        client.try_set_slug(&course_id, &creator, &empty),
        Err(Ok(Error::EmptySlug))
    );
    assert_eq!(
        client.try_set_description(&course_id, &creator, &empty),
        Err(Ok(Error::EmptyDescription))
    );
    assert_eq!(
        client.try_set_category(&course_id, &creator, &empty),
        Err(Ok(Error::EmptyCategory))
    );
    assert_eq!(client.get_title(&course_id), s(&env, "Solidity Basics"));
}

#[test]
fn test_setters_reject_non_owner() {
    let (env, client, _, course_id) = setup_course();
    let stranger = Address::generate(&env);

    assert_eq!(
        client.try_set_title(&course_id, &stranger, &s(&env, "Hijacked")),
        Err(Ok(Error::NotCourseOwner))
    );
    assert_eq!(
        client.try_set_slug(&course_id, &stranger, &s(&env, "hijacked")),
        Err(Ok(Error::NotCourseOwner))
    );
    assert_eq!(
        client.try_set_description(&course_id, &stranger, &s(&env, "Hijacked")),
        Err(Ok(Error::NotCourseOwner))
    );
    assert_eq!(
        client.try_set_category(&course_id, &stranger, &s(&env, "hijacked")),
        Err(Ok(Error::NotCourseOwner))
    );
    assert_eq!(
        client.try_set_course_price(&course_id, &stranger, &1),
        Err(Ok(Error::NotCourseOwner))
    );
    assert_eq!(
        client.try_transfer_course_ownership(&course_id, &stranger, &stranger),
        Err(Ok(Error::NotCourseOwner))
    );
}

#[test]
fn test_marketplace_owner_cannot_edit_course() {
    let (env, client, owner, token, _) = setup_test_env();
    let creator = funded_buyer(&env, &token);
    let course_id = purchase(&env, &client, &creator, "Solidity Basics", FEE);

    assert_eq!(
        client.try_set_title(&course_id, &owner, &s(&env, "Owner edit")),
        Err(Ok(Error::NotCourseOwner))
    );
}

// ------------------------------------------------------------------------------------------------
// Ownership
// ------------------------------------------------------------------------------------------------

#[test]
fn test_transfer_course_ownership() {
    let (env, client, creator, course_id) = setup_course();
    let new_owner = Address::generate(&env);

    client.transfer_course_ownership(&course_id, &creator, &new_owner);

    let (_, topics, data) = last_event(&env);
    assert_eq!(topic(&env, &topics, 0), COURSE_OWNERSHIP_TRANSFERRED);
    let (previous, current): (Address, Address) = data.into_val(&env);
    assert_eq!(previous, creator);
    assert_eq!(current, new_owner);
    assert_eq!(client.get_course_owner(&course_id), new_owner);

    // Edit rights follow the record; the purchase history does not.
    assert_eq!(
        client.try_set_title(&course_id, &creator, &s(&env, "Old owner")),
        Err(Ok(Error::NotCourseOwner))
    );
    client.set_title(&course_id, &new_owner, &s(&env, "New owner"));
    assert_eq!(client.get_user_courses(&creator).len(), 1);
}

#[test]
fn test_transfer_course_ownership_to_zero_address() {
    let (env, client, creator, course_id) = setup_course();

    assert_eq!(
        client.try_transfer_course_ownership(&course_id, &creator, &zero_address(&env)),
        Err(Ok(Error::InvalidOwner))
    );
    assert_eq!(client.get_course_owner(&course_id), creator);
}

// ------------------------------------------------------------------------------------------------
// Record construction
// ------------------------------------------------------------------------------------------------

#[test]
fn test_course_new_rejects_zero_owner() {
    let env = Env::default();

    let result = Course::new(
        &env,
        zero_address(&env),
        s(&env, "Title"),
        s(&env, "slug"),
        s(&env, "Description"),
        s(&env, "category"),
        0,
    );
    assert_eq!(result, Err(Error::InvalidOwner));
}

#[test]
fn test_course_new_validates_fields() {
    let env = Env::default();
    let owner = Address::generate(&env);
    let build = |title: &str, slug: &str, description: &str, category: &str, price: i128| {
        Course::new(
            &env,
            owner.clone(),
            s(&env, title),
            s(&env, slug),
            s(&env, description),
            s(&env, category),
            price,
        )
    };

    assert_eq!(build("", "s", "d", "c", 1), Err(Error::EmptyTitle));
    assert_eq!(build("t", "", "d", "c", 1), Err(Error::EmptySlug));
    assert_eq!(build("t", "s", "", "c", 1), Err(Error::EmptyDescription));
    assert_eq!(build("t", "s", "d", "", 1), Err(Error::EmptyCategory));
    assert_eq!(build("t", "s", "d", "c", -1), Err(Error::InvalidPrice));

    let course = build("t", "s", "d", "c", 0).unwrap();
    assert_eq!(course.owner, owner);
    assert_eq!(course.price, 0);
}

#[test]
fn test_course_setters_return_previous_value() {
    let env = Env::default();
    let owner = Address::generate(&env);
    let mut course = Course::new(
        &env,
        owner.clone(),
        s(&env, "Title"),
        s(&env, "slug"),
        s(&env, "Description"),
        s(&env, "category"),
        10,
    )
    .unwrap();

    assert_eq!(course.set_title(s(&env, "Next")), Ok(s(&env, "Title")));
    assert_eq!(course.set_price(20), Ok(10));
    assert_eq!(course.set_title(s(&env, "")), Err(Error::EmptyTitle));
    assert_eq!(course.title, s(&env, "Next"));

    let heir = Address::generate(&env);
    assert_eq!(course.transfer_ownership(&env, heir.clone()), Ok(owner.clone()));
    assert_eq!(course.ensure_owner(&owner), Err(Error::NotCourseOwner));
    assert_eq!(course.ensure_owner(&heir), Ok(()));
}
