//! Server-rendered HTML pages.
//!
//! Everything user-supplied goes through [`escape`] before it reaches the page.

use serde::Deserialize;
use std::fmt::Write;

use crate::assessment::Verdict;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

/// How the prediction form collects its values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// One labeled field per feature
    #[default]
    Fields,
    /// All values pasted as one comma-separated string
    Pasted,
}

impl InputMode {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Pasted => "pasted",
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fields" => Ok(Self::Fields),
            "pasted" => Ok(Self::Pasted),
            _ => Err(format!("Unknown input mode: {}", s)),
        }
    }
}

/// Result block shown under the form
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Verdict(Verdict),
    Error(String),
}

/// Everything needed to render the prediction page
#[derive(Debug, Clone)]
pub struct PredictView {
    pub mode: InputMode,
    pub fields: Vec<String>,
    pub pasted: String,
    pub outcome: Option<Outcome>,
}

impl PredictView {
    pub fn empty(mode: InputMode) -> Self {
        Self {
            mode,
            fields: vec![String::new(); FEATURE_COUNT],
            pasted: String::new(),
            outcome: None,
        }
    }
}

/// Escape text for HTML bodies and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const NAV: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/predict", "Parkinsons Prediction"),
    ("/about", "About Parkinson's Disease"),
    ("/model", "ML Model Info"),
    ("/about-us", "About us"),
];

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; color: #CCCFDA; background-color: #2F3F59; }
.app { display: flex; min-height: 100vh; background-size: cover; background-position: center; background-attachment: fixed; }
nav { width: 16rem; padding: 1rem; background-color: #4F5D81; }
nav h2 { font-size: 1.1rem; }
nav a { display: block; padding: 0.5rem; color: #CCCFDA; text-decoration: none; border-radius: 8px; }
nav a.active { background-color: rgba(255, 75, 75, 0.6); }
main { flex: 1; padding: 2rem; }
h1, h2, h3 { color: #CCCFDA; text-align: center; }
input, textarea { background-color: rgba(47, 63, 89, 0.8); color: #CCCFDA; border-radius: 8px; padding: 10px; border: 1px solid #4F5D81; }
.grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 0.75rem; }
.grid label { display: flex; flex-direction: column; }
textarea { width: 100%; min-height: 6rem; }
button { background-color: #FF4B4B; color: white; font-weight: bold; border-radius: 8px; padding: 12px; border: none; margin-top: 1rem; }
.success { background-color: rgba(33, 195, 84, 0.2); padding: 1rem; border-radius: 8px; }
.error { background-color: rgba(255, 43, 43, 0.2); padding: 1rem; border-radius: 8px; }
.info { background-color: rgba(28, 131, 225, 0.2); padding: 1rem; border-radius: 8px; }
details { margin: 0.75rem 0; padding: 0.5rem 1rem; background-color: rgba(47, 63, 89, 0.8); border-radius: 8px; }
"#;

fn layout(title: &str, active: &str, background: Option<&str>, body: &str) -> String {
    let mut nav = String::new();
    for (href, label) in NAV {
        let class = if href == active { " class=\"active\"" } else { "" };
        let _ = write!(nav, "<a href=\"{}\"{}>{}</a>", href, class, escape(label));
    }

    let background_css = background
        .map(|url| format!(".app {{ background-image: url(\"{}\"); }}", url))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Health Assistant</title>\n<style>{style}{background_css}</style>\n</head>\n\
         <body>\n<div class=\"app\">\n<nav><h2>Parkinson&#39;s Disease Prediction System</h2>{nav}</nav>\n\
         <main>\n{body}\n</main>\n</div>\n</body>\n</html>\n",
        title = escape(title),
        style = STYLE,
    )
}

fn list(items: &[&str]) -> String {
    let mut out = String::from("<ul>");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape(item));
    }
    out.push_str("</ul>");
    out
}

fn section(heading: &str, items: &[&str]) -> String {
    format!("<h3>{}</h3>{}", escape(heading), list(items))
}

fn expander(summary: &str, inner: &str) -> String {
    format!(
        "<details><summary>{}</summary>{}</details>",
        escape(summary),
        inner
    )
}

pub fn home(background: Option<&str>) -> String {
    let body = [
        "<h1>Health Assistant</h1>".to_string(),
        "<h2>A Machine Learning-Based Parkinson&#39;s Disease Prediction System</h2>".to_string(),
        format!(
            "<p>{}</p>",
            escape(
                "Parkinson's disease is a progressive nervous system disorder that affects \
                 movement, speech, and overall quality of life. Early diagnosis can significantly \
                 improve treatment outcomes and symptom management."
            )
        ),
        section(
            "Why is Early Detection Important?",
            &[
                "There is no cure for Parkinson's, but early treatment can help slow down the disease.",
                "Many symptoms start subtly, so early diagnosis is key to managing the condition effectively.",
                "Machine learning tools can help doctors and patients spot potential cases early.",
            ],
        ),
        section(
            "How This Application Works",
            &[
                "A machine learning model trained on patient voice recordings predicts Parkinson's disease.",
                "It analyzes 22 voice-related parameters to detect subtle variations linked to Parkinson's.",
                "Enter your measurements on the prediction page and get a result immediately.",
            ],
        ),
        section(
            "Get Started",
            &[
                "Go to \"Parkinsons Prediction\" in the sidebar to use the model.",
                "Read about the disease and its symptoms in \"About Parkinson's Disease\".",
                "See how the model makes predictions in \"ML Model Info\".",
            ],
        ),
        "<p class=\"success\">This tool supports early detection and awareness. It does not \
         replace a medical diagnosis.</p>"
            .to_string(),
    ]
    .concat();

    layout("Home", "/", background, &body)
}

pub fn predict(background: Option<&str>, view: &PredictView) -> String {
    let mut body = String::from(
        "<h1>Parkinson&#39;s Disease Prediction</h1>\
         <h3>Predict Parkinson&#39;s Disease using Machine Learning</h3>",
    );

    body.push_str(
        "<p>Choose your input method: \
         <a href=\"/predict?mode=fields\">Enter values one by one</a> | \
         <a href=\"/predict?mode=pasted\">Paste all values (comma-separated)</a></p>",
    );

    let _ = write!(
        body,
        "<form method=\"post\" action=\"/predict\">\
         <input type=\"hidden\" name=\"mode\" value=\"{}\">",
        view.mode.as_str()
    );

    match view.mode {
        InputMode::Fields => {
            body.push_str("<h3>Enter Each Parameter Below</h3><div class=\"grid\">");
            for (i, label) in FEATURE_NAMES.iter().enumerate() {
                let value = view.fields.get(i).map(String::as_str).unwrap_or("");
                let _ = write!(
                    body,
                    "<label>{} <input type=\"text\" name=\"f{}\" value=\"{}\" \
                     placeholder=\"Enter value...\"></label>",
                    escape(label),
                    i,
                    escape(value)
                );
            }
            body.push_str("</div>");
        }
        InputMode::Pasted => {
            let _ = write!(
                body,
                "<h3>Paste Your Values Below</h3>\
                 <label for=\"values\">Enter all {} values (comma-separated):</label>\
                 <textarea id=\"values\" name=\"values\" \
                 placeholder=\"e.g., 119.99,131.31,111.12,...\">{}</textarea>",
                FEATURE_COUNT,
                escape(&view.pasted)
            );
        }
    }

    body.push_str("<button type=\"submit\">Predict Now</button></form>");

    match &view.outcome {
        Some(Outcome::Verdict(verdict)) => {
            let class = match verdict {
                Verdict::NoRiskDetected => "success",
                Verdict::RiskDetected => "error",
            };
            let _ = write!(
                body,
                "<p class=\"success\">Prediction Complete!</p>\
                 <h3>{}</h3><p class=\"{}\">{}</p>",
                escape(verdict.headline()),
                class,
                escape(verdict.detail())
            );
        }
        Some(Outcome::Error(message)) => {
            let _ = write!(body, "<p class=\"error\">{}</p>", escape(message));
        }
        None => {}
    }

    layout("Parkinsons Prediction", "/predict", background, &body)
}

pub fn about(background: Option<&str>) -> String {
    let body = [
        "<h1>About Parkinson&#39;s Disease</h1>".to_string(),
        expander(
            "What is Parkinson's Disease?",
            &format!(
                "<p>{}</p>",
                escape(
                    "Parkinson's disease is a progressive nervous system disorder that affects \
                     movement. It occurs when dopamine-producing neurons in the brain become \
                     damaged or die."
                )
            ),
        ),
        expander(
            "Symptoms of Parkinson's Disease",
            &list(&[
                "Tremors (shaking in hands or fingers)",
                "Slow movements (bradykinesia)",
                "Muscle stiffness",
                "Balance and posture instability",
                "Speech and writing difficulties",
            ]),
        ),
        expander(
            "How is Parkinson's Disease Diagnosed?",
            &format!(
                "<p>{}</p>{}",
                escape("Parkinson's disease is diagnosed clinically based on symptoms. Additional tests include:"),
                list(&[
                    "Neurological examination",
                    "DaTscan (dopamine transporter scan)",
                    "Speech analysis",
                    "Machine learning models (like this app) for early detection",
                ])
            ),
        ),
    ]
    .concat();

    layout("About Parkinson's Disease", "/about", background, &body)
}

pub fn model_info(background: Option<&str>, description: &str) -> String {
    let body = [
        "<h1>Machine Learning Model Details</h1>".to_string(),
        expander(
            "Model Overview",
            &format!(
                "<p>Loaded model: <strong>{}</strong></p><p>{}</p>",
                escape(description),
                escape("The model is trained on voice frequency measurements.")
            ),
        ),
        expander(
            "Features Used in the Model",
            &format!(
                "<p>{}</p>{}",
                escape(
                    "The model takes the raw measurements as input in this order. \
                     No additional feature extraction is applied."
                ),
                list(&FEATURE_NAMES)
            ),
        ),
        expander(
            "Machine Learning Algorithm Used",
            &list(&[
                "Support Vector Machine (SVM) classifier.",
                "Runs locally without cloud-based computation.",
                "Trained on frequency-based voice measurements for Parkinson's disease detection.",
            ]),
        ),
    ]
    .concat();

    layout("ML Model Info", "/model", background, &body)
}

pub fn about_us(background: Option<&str>) -> String {
    let body = [
        "<h1>About This Application</h1>".to_string(),
        "<h2>Empowering Early Detection of Parkinson&#39;s Disease</h2>".to_string(),
        format!(
            "<p>{}</p>",
            escape(
                "Parkinson's disease is a neurodegenerative disorder that affects movement and \
                 speech. This application uses machine learning to assist in early detection, \
                 which is crucial for effective treatment."
            )
        ),
        section(
            "How This System Works",
            &[
                "The system analyzes 22 voice-related parameters extracted from speech patterns.",
                "A pre-trained model detects subtle variations associated with Parkinson's.",
                "The model was trained on a public dataset of Parkinson's voice recordings.",
            ],
        ),
        section(
            "Machine Learning Model Details",
            &[
                "Model type: supervised learning (classification)",
                "Algorithm: Support Vector Machine (SVM)",
                "Training data: publicly available Parkinson's voice recordings",
            ],
        ),
        "<p class=\"info\">This tool supports early detection and raises awareness about \
         Parkinson&#39;s disease.</p>"
            .to_string(),
    ]
    .concat();

    layout("About us", "/about-us", background, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape("119.99,131.31"), "119.99,131.31");
    }

    #[test]
    fn test_input_mode_parse() {
        assert_eq!("pasted".parse::<InputMode>().unwrap(), InputMode::Pasted);
        assert!("csv".parse::<InputMode>().is_err());
        assert_eq!(InputMode::default(), InputMode::Fields);
    }

    #[test]
    fn test_active_nav_link() {
        let html = about(None);
        assert!(html.contains("<a href=\"/about\" class=\"active\">"));
        assert!(html.contains("<a href=\"/\">Home</a>"));
        assert!(!html.contains("background-image"));
    }

    #[test]
    fn test_predict_page_shows_error() {
        let mut view = PredictView::empty(InputMode::Pasted);
        view.pasted = "1,2,3".to_string();
        view.outcome = Some(Outcome::Error("Please enter exactly 22 values.".to_string()));
        let html = predict(None, &view);
        assert!(html.contains(">1,2,3</textarea>"));
        assert!(html.contains("<p class=\"error\">Please enter exactly 22 values.</p>"));
        assert!(!html.contains("Prediction Complete"));
    }

    #[test]
    fn test_predict_page_lists_all_fields() {
        let html = predict(None, &PredictView::empty(InputMode::Fields));
        for i in 0..FEATURE_COUNT {
            assert!(html.contains(&format!("name=\"f{}\"", i)));
        }
        assert!(html.contains("MDVP:Jitter(%)"));
    }
}
