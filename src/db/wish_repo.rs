use anyhow::Result;
use chrono::{Datelike, Local};

use crate::{
    db::{KvStore, get_slot, set_slot},
    domain::wish::{Wish, WishForm, WishId, generate_code},
};

pub(crate) const WISHES_KEY: &str = "wishlink_wishes";

fn load(store: &dyn KvStore) -> Result<Vec<Wish>> {
    get_slot(store, WISHES_KEY, Vec::new())
}

fn persist(store: &dyn KvStore, wishes: &[Wish]) -> Result<()> {
    set_slot(store, WISHES_KEY, &wishes)
}

/// Re-draws until the code is unused among stored wishes. A shared code
/// must resolve to exactly one wish.
fn unique_code(wishes: &[Wish]) -> String {
    loop {
        let code = generate_code();
        if !wishes.iter().any(|w| w.code == code) {
            return code;
        }
    }
}

fn build(form: &WishForm, id: WishId, code: String, created_at: String) -> Wish {
    Wish {
        id,
        code,
        sender_name: form.sender_name.clone(),
        sender_phone: form.sender_phone.clone(),
        recipient_name: form.recipient_name.clone(),
        recipient_phone: form.recipient_phone.clone(),
        occasion: form.resolved_occasion().to_string(),
        message: form.message.clone(),
        photos: form.photos.clone(),
        occasion_date: form.occasion_date,
        occasion_month: form.occasion_month(),
        occasion_day: form.occasion_day(),
        created_at,
        notified: false,
        gift_card: form.gift_card.clone(),
    }
}

pub(crate) fn create(store: &dyn KvStore, form: &WishForm) -> Result<Wish> {
    let mut wishes = load(store)?;
    let code = unique_code(&wishes);
    let wish = build(form, WishId::new(), code, Local::now().to_rfc3339());
    wishes.push(wish.clone());
    persist(store, &wishes)?;
    Ok(wish)
}

/// Replaces every form-sourced field, keeping `id`, `code` and
/// `created_at` and clearing `notified`. `None` when the id is unknown.
pub(crate) fn update(store: &dyn KvStore, id: &WishId, form: &WishForm) -> Result<Option<Wish>> {
    let mut wishes = load(store)?;
    let Some(pos) = wishes.iter().position(|w| w.id == *id) else {
        return Ok(None);
    };
    let prior = &wishes[pos];
    let replacement = build(form, prior.id.clone(), prior.code.clone(), prior.created_at.clone());
    wishes[pos] = replacement.clone();
    persist(store, &wishes)?;
    Ok(Some(replacement))
}

pub(crate) fn delete(store: &dyn KvStore, id: &WishId) -> Result<()> {
    let mut wishes = load(store)?;
    wishes.retain(|w| w.id != *id);
    persist(store, &wishes)
}

pub(crate) fn find_by_code(store: &dyn KvStore, code: &str) -> Result<Option<Wish>> {
    let wishes = load(store)?;
    Ok(wishes.into_iter().find(|w| w.code.eq_ignore_ascii_case(code)))
}

pub(crate) fn list_by_sender_phone(store: &dyn KvStore, phone: &str) -> Result<Vec<Wish>> {
    let wishes = load(store)?;
    Ok(wishes.into_iter().filter(|w| w.sender_phone == phone).collect())
}

pub(crate) fn list_by_recipient_phone(store: &dyn KvStore, phone: &str) -> Result<Vec<Wish>> {
    let wishes = load(store)?;
    Ok(wishes.into_iter().filter(|w| w.recipient_phone == phone).collect())
}

pub(crate) fn mark_notified(store: &dyn KvStore, id: &WishId) -> Result<()> {
    let mut wishes = load(store)?;
    if let Some(wish) = wishes.iter_mut().find(|w| w.id == *id) {
        wish.notified = true;
        persist(store, &wishes)?;
    }
    Ok(())
}

/// Wishes whose occasion falls on today's month and day (year ignored,
/// the occasion recurs annually) and which have not been notified yet.
pub(crate) fn list_due_for_notification(store: &dyn KvStore) -> Result<Vec<Wish>> {
    let today = Local::now().date_naive();
    let wishes = load(store)?;
    Ok(wishes
        .into_iter()
        .filter(|w| {
            !w.notified && w.occasion_month == today.month() && w.occasion_day == today.day()
        })
        .collect())
}
