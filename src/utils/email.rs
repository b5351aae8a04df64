use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::instrument;

use schoolhub_config::EmailConfig;
use schoolhub_core::AppError;
use schoolhub_models::contact::ContactMessage;
use schoolhub_models::roles::UserRole;

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Forwards a contact form submission to `CONTACT_NOTIFY_EMAIL`.
    ///
    /// Returns `false` without sending when SMTP is disabled or no recipient is
    /// configured.
    #[instrument(skip(self, message), fields(contact_id = %message.id))]
    pub async fn send_contact_notification(
        &self,
        message: &ContactMessage,
    ) -> Result<bool, AppError> {
        let Some(recipient) = self.config.contact_notify_email.clone() else {
            return Ok(false);
        };
        if !self.config.enabled {
            return Ok(false);
        }

        let subject = format!("New contact message: {}", message.subject);
        let text_body = format!(
            "From: {} <{}>\n\
             Subject: {}\n\n\
             {}",
            message.name, message.email, message.subject, message.message
        );
        let html_body = self.contact_template(message);

        self.send_email(&recipient, &subject, &text_body, &html_body)
            .await?;
        Ok(true)
    }

    #[instrument(skip(self))]
    pub async fn send_welcome_email(
        &self,
        to_email: &str,
        to_name: &str,
        role: UserRole,
        dashboard_link: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            return Ok(());
        }

        let html_body = self.welcome_template(to_name, role, dashboard_link);
        let text_body = format!(
            "Hi {},\n\n\
             Your {} account has been created.\n\n\
             Sign in to your dashboard here:\n\
             {}\n\n\
             Best regards,\n\
             SchoolHub Team",
            to_name, role, dashboard_link
        );

        self.send_email(to_email, "Welcome to SchoolHub", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn contact_template(&self, message: &ContactMessage) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>New contact message</title></head>
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px; padding: 30px;">
        <tr><td><h2 style="margin: 0 0 20px 0; color: #333333;">{}</h2></td></tr>
        <tr><td style="color: #666666; font-size: 14px;">From <strong>{}</strong> &lt;{}&gt;</td></tr>
        <tr><td style="padding-top: 20px; color: #333333; font-size: 16px; white-space: pre-wrap;">{}</td></tr>
    </table>
</body>
</html>"#,
            html_escape(&message.subject),
            html_escape(&message.name),
            html_escape(&message.email),
            html_escape(&message.message)
        )
    }

    fn welcome_template(&self, name: &str, role: UserRole, dashboard_link: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Welcome to SchoolHub</title></head>
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px; padding: 30px;">
        <tr><td><h2 style="margin: 0 0 20px 0; color: #333333;">Welcome, {}</h2></td></tr>
        <tr><td style="color: #666666; font-size: 16px;">Your {} account is ready.</td></tr>
        <tr>
            <td align="center" style="padding: 30px 0;">
                <a href="{}" style="display: inline-block; padding: 14px 40px; background-color: #4F46E5; color: #ffffff; text-decoration: none; border-radius: 6px; font-weight: bold;">Open your dashboard</a>
            </td>
        </tr>
        <tr><td style="color: #4F46E5; font-size: 14px; word-break: break-all;">{}</td></tr>
    </table>
</body>
</html>"#,
            html_escape(name),
            role,
            html_escape(dashboard_link),
            html_escape(dashboard_link)
        )
    }
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
