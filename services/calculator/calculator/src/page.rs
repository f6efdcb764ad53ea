use crate::display::DisplayState;

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn render(state: &DisplayState) -> String {
    let outcome = match (&state.result, &state.message) {
        (Some(result), _) => format!(
            "<p class=\"result\">Result: {} = {}</p>",
            escape(state.expression.trim()),
            escape(result)
        ),
        (None, Some(message)) => format!("<p class=\"error\">{}</p>", escape(message)),
        (None, None) => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Calculator</title>
</head>
<body>
<h1>Calculator</h1>
<form method="post" action="/">
<input type="text" name="expression" value="{expression}" placeholder="3+4*2" autofocus>
<button type="submit">=</button>
</form>
{outcome}
</body>
</html>
"#,
        expression = escape(&state.expression),
        outcome = outcome,
    )
}
