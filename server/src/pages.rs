//! Minimal inline HTML pages for the form UI.

pub fn home_page(link: Option<&str>, result: Option<(&str, &str)>, error: Option<&str>) -> String {
    let link_value = escape_html(link.unwrap_or(""));

    let mut body = String::new();
    if let Some((title, summary)) = result {
        body.push_str(&format!(
            "<section class=\"summary\">\n<h2>{}</h2>\n<p>{}</p>\n</section>\n",
            escape_html(title),
            escape_html(summary)
        ));
    }
    if let Some(message) = error {
        body.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(message)
        ));
    }

    format!(
        "<!doctype html>\n<html>\n<head><title>QuickFacts</title></head>\n<body>\n\
         <h1>QuickFacts</h1>\n\
         <form method=\"post\" action=\"/\">\n\
         <input type=\"url\" name=\"link\" class=\"form-control\" \
         placeholder=\"Enter a link...\" value=\"{link_value}\" required>\n\
         <button type=\"submit\">Summarize</button>\n\
         </form>\n{body}</body>\n</html>\n"
    )
}

pub fn search_page() -> String {
    "<!doctype html>\n<html>\n<head><title>QuickFacts - Search</title></head>\n<body>\n\
     <h1>Search summarized articles</h1>\n\
     <form method=\"get\" action=\"/search/articles\">\n\
     <input type=\"text\" name=\"q\" class=\"form-control\" placeholder=\"Search titles...\">\n\
     <button type=\"submit\">Search</button>\n\
     </form>\n</body>\n</html>\n"
        .to_string()
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
