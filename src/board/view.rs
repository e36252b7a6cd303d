use crate::board::format::format_amount;
use crate::market::coin::Coin;
use std::fmt;
use tabled::builder::Builder;
use tabled::settings::Style;

/// One table row, derived from a single coin so the numbers always belong to
/// the row they are shown in.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayRow {
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub id: String,
    pub icon: String,
    pub market_cap: String,
    pub price: String,
}

impl From<&Coin> for DisplayRow {
    fn from(coin: &Coin) -> Self {
        DisplayRow {
            rank: coin.rank,
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            id: coin.id.clone(),
            icon: coin.icon.clone(),
            market_cap: format_amount(&coin.market_cap),
            price: format_amount(&coin.price),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardView {
    pub rows: Vec<DisplayRow>,
    /// Names offered by the select box, taken from the whole snapshot.
    pub options: Vec<String>,
    pub search: String,
    pub row_limit_input: String,
    pub advisories: Vec<&'static str>,
}

fn column_headers(currency: &str) -> [String; 5] {
    let currency = currency.to_uppercase();
    [
        "Rank".to_string(),
        "Name".to_string(),
        "Symbol".to_string(),
        format!("Market Cap ({})", currency),
        format!("Price ({})", currency),
    ]
}

pub fn render_table(view: &BoardView, currency: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record(column_headers(currency));
    for row in &view.rows {
        builder.push_record([
            row.rank.to_string(),
            row.name.clone(),
            row.symbol.clone(),
            row.market_cap.clone(),
            row.price.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern());

    let mut output = String::new();
    for advisory in &view.advisories {
        output.push_str("! ");
        output.push_str(advisory);
        output.push('\n');
    }
    output.push_str(&table.to_string());
    output
}

pub fn render_html(view: &BoardView, currency: &str) -> String {
    HtmlPage { view, currency }.to_string()
}

struct HtmlPage<'a> {
    view: &'a BoardView,
    currency: &'a str,
}

impl fmt::Display for HtmlPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let view = self.view;

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html>")?;
        writeln!(f, "<head><meta charset=\"utf-8\"><title>All Cryptocurrencies</title></head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<div class=\"App\">")?;
        writeln!(f, "<h1>All Cryptocurrencies</h1>")?;

        for advisory in &view.advisories {
            writeln!(f, "<p class=\"error\">{}</p>", Escaped(advisory))?;
        }

        writeln!(f, "<div class=\"search-container\">")?;
        writeln!(f, "<label for=\"cryptoSelect\">Search by Name:</label>")?;
        writeln!(f, "<div class=\"input-select\">")?;
        writeln!(f, "<select id=\"cryptoSelect\" class=\"form-select\">")?;
        writeln!(f, "<option value=\"\">Select a cryptocurrency</option>")?;
        for name in &view.options {
            let selected = if *name == view.search { " selected" } else { "" };
            writeln!(
                f,
                "<option value=\"{}\"{}>{}</option>",
                Escaped(name),
                selected,
                Escaped(name)
            )?;
        }
        writeln!(f, "</select>")?;
        let input_class = if view.advisories.is_empty() {
            "form-control"
        } else {
            "form-control error-input"
        };
        writeln!(
            f,
            "<input type=\"text\" class=\"{}\" placeholder=\"Search...\" value=\"{}\">",
            input_class,
            Escaped(&view.search)
        )?;
        writeln!(f, "</div>")?;
        writeln!(f, "</div>")?;

        writeln!(f, "<div class=\"data-range-container\">")?;
        writeln!(f, "<label for=\"dataRange\">Data Range (Number of Currencies):</label>")?;
        writeln!(
            f,
            "<input type=\"number\" id=\"dataRange\" class=\"form-control\" placeholder=\"Enter a number...\" value=\"{}\">",
            Escaped(&view.row_limit_input)
        )?;
        writeln!(f, "</div>")?;

        writeln!(f, "<table class=\"table\">")?;
        write!(f, "<thead><tr>")?;
        for header in column_headers(self.currency) {
            write!(f, "<th scope=\"col\">{}</th>", Escaped(&header))?;
        }
        writeln!(f, "</tr></thead>")?;
        writeln!(f, "<tbody>")?;
        for row in &view.rows {
            writeln!(
                f,
                "<tr><td class=\"rank\">{}</td><td class=\"logo\"><a href=\"{}\"><img src=\"{}\" alt=\"logo\" width=\"30px\"></a><p>{}</p></td><td class=\"symbol\">{}</td><td>{}</td><td>{}</td></tr>",
                row.rank,
                Escaped(&row.id),
                Escaped(&row.icon),
                Escaped(&row.name),
                Escaped(&row.symbol),
                row.market_cap,
                row.price
            )?;
        }
        writeln!(f, "</tbody>")?;
        writeln!(f, "</table>")?;
        writeln!(f, "</div>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

/// Text made safe for HTML element content and quoted attribute values.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}
