use axum::response::IntoResponse;
use strum::VariantArray;

use crate::contact::Subject;
use crate::template;

/// One entry of the FAQ list rendered on the help page
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(askama::Template)]
#[template(path = "help.html")]
pub struct HelpTemplate {
    pub subjects: &'static [Subject],
    pub faqs: Vec<Faq>,
}

pub async fn page() -> impl IntoResponse {
    template::render(HelpTemplate {
        subjects: Subject::VARIANTS,
        faqs: faqs(),
    })
}

fn faqs() -> Vec<Faq> {
    vec![
        Faq {
            question: "How accurate is the AI food analysis?",
            answer: "Our AI-powered analysis provides estimates with high accuracy for most \
                     common foods. However, for complex dishes or unusual ingredients, results \
                     may vary. We recommend using the detailed breakdown feature for more \
                     precise information.",
        },
        Faq {
            question: "Can I use Carbie without an internet connection?",
            answer: "Carbie requires an internet connection for AI analysis and database \
                     access. We're working on offline capabilities for future updates.",
        },
        Faq {
            question: "How does the blood glucose timing feature work?",
            answer: "The glucose timing feature estimates when your blood sugar will peak based \
                     on the carbohydrate content and glycemic index of the foods you've \
                     analyzed. This is an estimate and should not replace medical advice.",
        },
        Faq {
            question: "Is my data secure and private?",
            answer: "Yes, we take your privacy seriously. All data is encrypted and stored \
                     securely. We never share your personal information with third parties \
                     without your explicit consent.",
        },
        Faq {
            question: "Can I export my nutrition data?",
            answer: "Currently, we're working on data export features. This will be available \
                     in a future update, allowing you to export your nutrition history and \
                     analysis data.",
        },
        Faq {
            question: "What devices are supported?",
            answer: "Carbie is currently available for Android devices. We're working on iOS \
                     support and will announce when it becomes available.",
        },
    ]
}
