use std::fmt::Write;

use crate::application::render::types::RenderError;

const SHELL_CLOSE: &str = "
</table>
</body>
</html>
";

/// Wraps the concatenated section rows in the email document shell.
///
/// The head carries the title, a stylesheet sized by `layout_width` and an
/// Outlook (`mso`) conditional block that keeps images from overflowing.
pub(super) fn assemble(title: &str, layout_width: &str, body: &str) -> Result<String, RenderError> {
    let mut html = String::with_capacity(body.len() + 2048);
    write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta http-equiv="Content-Type" content="text/html; charset=UTF-8">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 0; }}
.container {{ max-width: {layout_width}; margin: 0 auto; background: #ffffff; border: 1px solid #dddddd; }}
.header, .content, .footer, .button-container, .button {{ font-size: 16px; line-height: 1.5; }}
.header, .footer {{ text-align: center; }}
.button-container {{ text-align: center; }}
.button {{ background-color: #007BFF; color: #ffffff; text-decoration: none; padding: 10px 20px; border-radius: 5px; display: inline-block; font-size: 16px; }}
.button a {{ color: #ffffff; text-decoration: none; }}
img {{ display: block; margin: 0 auto; border: none; }}
</style>
<!--[if mso]>
<style type="text/css">
img {{ width: auto; max-width: 100%; height: auto; }}
</style>
<![endif]-->
</head>
<body style="background-color: #f4f4f4; margin: 0; padding: 0;">
<table class="container" align="center" cellpadding="0" cellspacing="0" border="0">
"#
    )?;
    html.push_str(body);
    html.push_str(SHELL_CLOSE);
    Ok(html)
}
