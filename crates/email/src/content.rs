//! Shared email content templates
//!
//! Canonical content generators for verification-code emails, used by both
//! production (SES) and mock email services.

/// Generate plain-text body for a verification-code email.
pub fn verification_code_text(code: &str, verify_url: &str) -> String {
    format!(
        "Hi there!\n\n\
        Your verification code is {}.\n\n\
        Enter it at the link below to activate your account:\n\
        {}\n\n\
        The code is only valid for a short time. If it has expired, register\n\
        again to receive a fresh one.\n\n\
        If you didn't create an account, you can ignore this email.\n\n\
        Thanks,\n\
        The Gatehouse Team",
        code, verify_url
    )
}

/// Generate styled HTML body for a verification-code email.
pub fn verification_code_html(code: &str, verify_url: &str) -> String {
    format!(
        r#"
            <html>
            <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
                <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
                    <h2 style="color: #007cba;">Activate your account</h2>

                    <p>Hi there!</p>

                    <p>Your verification code is</p>

                    <div style="text-align: center; margin: 30px 0;">
                        <span style="font-size: 28px; letter-spacing: 8px; font-weight: bold; background-color: #f5f5f5; padding: 12px 24px; border-radius: 4px; display: inline-block;">
                            {code}
                        </span>
                    </div>

                    <p>Enter it at the link below to activate your account:</p>
                    <p style="background-color: #f5f5f5; padding: 10px; border-radius: 4px; word-break: break-all;">
                        <a href="{verify_url}">{verify_url}</a>
                    </p>

                    <p style="color: #666; font-size: 14px;">
                        <em>The code is only valid for a short time. If it has expired, register again to receive a fresh one.</em>
                    </p>

                    <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">

                    <p style="color: #666; font-size: 12px;">
                        If you didn't create an account, you can ignore this email.<br>
                        Thanks, The Gatehouse Team
                    </p>
                </div>
            </body>
            </html>
            "#,
        code = code,
        verify_url = verify_url
    )
}
