use std::sync::Arc;

use chrono::{DateTime, Utc};
use tera::Tera;
use tracing::{error, info};

use crate::domain::models::member::Member;
use crate::domain::ports::{EmailService, MemberRepository};
use crate::domain::services::membership::days_until_expiry;
use crate::error::AppError;

/// Days-left values that trigger a renewal reminder.
const REMINDER_DAYS: [i64; 2] = [7, 1];

pub struct ReminderService {
    member_repo: Arc<dyn MemberRepository>,
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    app_base_url: String,
}

impl ReminderService {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
        app_base_url: String,
    ) -> Self {
        Self { member_repo, email_service, templates, app_base_url }
    }

    /// Pure selection step, split out so the cutoff logic is testable
    /// without a database.
    pub fn members_due_for_reminder(members: &[Member], now: DateTime<Utc>) -> Vec<&Member> {
        members
            .iter()
            .filter(|m| REMINDER_DAYS.contains(&days_until_expiry(m.expiry_date, now)))
            .collect()
    }

    /// Sends a renewal reminder to every member expiring in exactly 7 or 1
    /// days. Per-member failures are logged and skipped; only successes
    /// count toward the returned total.
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> Result<u32, AppError> {
        let members = self.member_repo.list_all().await?;
        let due = Self::members_due_for_reminder(&members, now);

        let mut sent = 0u32;

        for member in due {
            let days_left = days_until_expiry(member.expiry_date, now);

            let Some(email) = member.email.as_deref() else {
                info!("Skipping reminder for {}: no email on file", member.id);
                continue;
            };

            match self.send_reminder(member, email, days_left).await {
                Ok(_) => {
                    info!("Reminder sent to {} ({} days left)", member.id, days_left);
                    sent += 1;
                }
                Err(e) => {
                    error!("Failed to send reminder to {}: {:?}", member.id, e);
                }
            }
        }

        info!("Reminder sweep finished: {} sent", sent);
        Ok(sent)
    }

    async fn send_reminder(&self, member: &Member, email: &str, days_left: i64) -> Result<(), AppError> {
        let day_word = if days_left == 1 { "day" } else { "days" };

        let mut context = tera::Context::new();
        context.insert("member_name", &member.name);
        context.insert("days_left", &days_left);
        context.insert("day_word", day_word);
        context.insert("renew_link", &format!("{}/dashboard", self.app_base_url));

        let html = self.templates.render("reminder.html", &context)
            .map_err(|e| AppError::InternalWithMsg(format!("Reminder template render error: {:?}", e)))?;

        let subject = format!("Membership Expiring in {} {}", days_left, day_word);
        self.email_service.send(email, &subject, &html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::member::{Member, NewMemberParams};
    use crate::domain::models::plan::Plan;
    use chrono::Duration;

    fn member_expiring_in(days: i64, now: DateTime<Utc>) -> Member {
        let mut m = Member::new(NewMemberParams {
            qr_id: None,
            phone: "+85512345678".to_string(),
            name: "Test".to_string(),
            email: Some("test@example.com".to_string()),
            password_hash: "hash".to_string(),
            plan: Plan::OneMonth,
            home_location: None,
        });
        m.expiry_date = now + Duration::days(days);
        m
    }

    #[test]
    fn selects_only_seven_and_one_day_cutoffs() {
        let now = Utc::now();
        let members = vec![
            member_expiring_in(7, now),
            member_expiring_in(6, now),
            member_expiring_in(1, now),
            member_expiring_in(0, now),
            member_expiring_in(30, now),
            member_expiring_in(-2, now),
        ];

        let due = ReminderService::members_due_for_reminder(&members, now);
        let days: Vec<i64> = due.iter().map(|m| days_until_expiry(m.expiry_date, now)).collect();
        assert_eq!(days, vec![7, 1]);
    }
}
