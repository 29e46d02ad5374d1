//! Logo selection for ticker symbols.
//!
//! The resolver is picked once from configuration (whether a logo service token is
//! available) and handed to whatever renders symbols. Apple always gets its own glyph.

use std::fmt;

/// Base URL of the remote logo service.
pub const LOGO_SERVICE_URL: &str = "https://img.logo.dev/ticker";

const APPLE_SVG: &str = concat!(
    "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24\" ",
    "viewBox=\"0 0 24 24\" fill=\"white\"><path d=\"M18.71 19.5c-.83 1.24-1.71 2.45-3.05 2.47-1.34.03-1.77-.79-3.29-.79-1.53 ",
    "0-2 .77-3.27.82-1.31.05-2.3-1.32-3.14-2.53C4.25 17 2.94 12.45 4.7 9.39c.87-1.52 2.43-2.48 4.12-2.51 1.28-.02 ",
    "2.5.87 3.29.87.78 0 2.26-1.07 3.81-.91.65.03 2.47.26 3.64 1.98-.09.06-2.17 1.28-2.15 3.81.03 3.02 2.65 4.03 ",
    "2.68 4.04-.03.07-.42 1.44-1.38 2.83M13 3.5c.73-.83 1.94-1.46 2.94-1.5.13 1.17-.34 2.35-1.04 3.19-.69.85-1.83 ",
    "1.51-2.95 1.42-.15-1.15.41-2.35 1.05-3.11z\"/></svg>"
);

/// A resolved logo reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Logo {
    /// Built-in glyph for symbols with a dedicated mark.
    SpecialCaseSvg(String),
    /// Image served by the remote logo service.
    Remote(String),
    /// Generated letter tile.
    Placeholder(String),
}

impl Logo {
    /// The `src` value to hand to an image element.
    pub fn src(&self) -> &str {
        match self {
            Logo::SpecialCaseSvg(s) | Logo::Remote(s) | Logo::Placeholder(s) => s,
        }
    }
}

impl fmt::Display for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.src())
    }
}

/// How logos are obtained for symbols without a dedicated mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoResolver {
    /// Fetch from the remote logo service with an access token.
    RemoteService {
        /// Service access token.
        token: String,
    },
    /// Draw the first character of the symbol.
    Placeholder,
}

impl LogoResolver {
    /// Selects the remote service when a non-blank token is configured.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some(token) if !token.is_empty() => LogoResolver::RemoteService {
                token: String::from(token),
            },
            _ => LogoResolver::Placeholder,
        }
    }

    /// Logo for `symbol`.
    pub fn resolve(&self, symbol: &str) -> Logo {
        if symbol == "AAPL" {
            return Logo::SpecialCaseSvg(String::from(APPLE_SVG));
        }
        match self {
            LogoResolver::RemoteService { token } => Logo::Remote(format!(
                "{}/{}?token={}&format=png&retina=true",
                LOGO_SERVICE_URL, symbol, token
            )),
            LogoResolver::Placeholder => Logo::Placeholder(placeholder_svg(symbol)),
        }
    }
}

fn placeholder_svg(symbol: &str) -> String {
    let initial = symbol.chars().next().map(String::from).unwrap_or_default();
    format!(
        "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\">\
         <text x=\"50%\" y=\"50%\" text-anchor=\"middle\" dy=\".3em\" fill=\"white\" font-family=\"system-ui\" \
         font-size=\"12\" font-weight=\"600\">{}</text></svg>",
        initial
    )
}
