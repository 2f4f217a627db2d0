pub mod agent_display;
pub mod ask_page;
pub mod banner;
pub mod button;
pub mod card;
pub mod chat_widget;
pub mod input;
pub mod report_card;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use agent_display::{AgentDisplay, AgentDisplayProps};
pub use ask_page::{AskPage, AskPageProps};
pub use banner::{Banner, BannerProps};
pub use button::Button;
pub use card::{Card, Tone};
pub use chat_widget::{ChatWidget, ChatWidgetProps};
pub use input::{PromptInput, PromptInputProps};
pub use report_card::{ReportCard, ReportCardProps, Sky};
