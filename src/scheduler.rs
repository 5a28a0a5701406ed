//! Minute-interval polling loop that simulates SMS delivery on the day
//! of the occasion. Delivery is a log line; there is no real carrier,
//! so a wish is marked notified immediately after the send attempt.

use anyhow::Result;
use chrono::{Local, Timelike};
use std::{thread, time::Duration};
use tracing::info;

use crate::{
    db::{KvStore, wish_repo},
    domain::wish::Wish,
};

pub(crate) const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// The always-on loop holds deliveries until this local hour; the manual
/// one-shot check does not.
pub(crate) const MIN_SEND_HOUR: u32 = 9;

pub(crate) fn compose_sms(wish: &Wish) -> String {
    format!(
        "Hey {}! 🎉 {} has a special wish for you on your {}! Use this code: {} at WishLink to see your surprise! ✨",
        wish.recipient_name, wish.sender_name, wish.occasion, wish.code
    )
}

fn deliver(wish: &Wish) {
    info!(
        to = %wish.recipient_phone,
        code = %wish.code,
        occasion = %wish.occasion,
        "sms simulation: {}",
        compose_sms(wish)
    );
}

/// One pass over the repository: deliver everything due today, mark each
/// notified, report how many went out.
pub(crate) fn run_once(store: &dyn KvStore) -> Result<usize> {
    let due = wish_repo::list_due_for_notification(store)?;
    for wish in &due {
        deliver(wish);
        wish_repo::mark_notified(store, &wish.id)?;
    }
    Ok(due.len())
}

/// Always-on variant: a pass every `CHECK_INTERVAL`, skipped entirely
/// before `MIN_SEND_HOUR`. Runs until the process is terminated.
pub(crate) fn run(store: &dyn KvStore) -> Result<()> {
    info!(interval_secs = CHECK_INTERVAL.as_secs(), "scheduler started");
    loop {
        if Local::now().hour() >= MIN_SEND_HOUR {
            let sent = run_once(store)?;
            if sent > 0 {
                info!(sent, "delivered due wishes");
            }
        }
        thread::sleep(CHECK_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::mem::MemStore;
    use crate::domain::wish::sample_form;

    #[test]
    fn composed_sms_embeds_names_occasion_and_code() {
        let store = MemStore::default();
        let wish = wish_repo::create(&store, &sample_form()).unwrap();
        let sms = compose_sms(&wish);
        assert!(sms.contains("Ravi"));
        assert!(sms.contains("Asha"));
        assert!(sms.contains("birthday"));
        assert!(sms.contains(&wish.code));
    }

    #[test]
    fn run_once_marks_due_wishes_and_drains_the_queue() {
        let store = MemStore::default();
        let mut form = sample_form();
        form.occasion_date = Local::now().date_naive();
        let wish = wish_repo::create(&store, &form).unwrap();

        assert_eq!(run_once(&store).unwrap(), 1);
        let after = wish_repo::find_by_code(&store, &wish.code).unwrap().unwrap();
        assert!(after.notified);
        assert_eq!(run_once(&store).unwrap(), 0);
    }

    #[test]
    fn run_once_ignores_wishes_on_other_dates() {
        let store = MemStore::default();
        let mut form = sample_form();
        form.occasion_date = Local::now().date_naive() + chrono::Duration::days(40);
        wish_repo::create(&store, &form).unwrap();
        assert_eq!(run_once(&store).unwrap(), 0);
    }
}
