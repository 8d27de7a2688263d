//! The beta-tester onboarding guide.
//!
//! [`build_guide`] assembles the fixed four-page walkthrough (install the
//! preview client, open the app, log in, sync, mark availability, tips,
//! help, privacy) as a [`Document`]. The wording is literal; the names,
//! URL, sample events and QR image come from [`GuideConfig`].

use crate::error::{Error, Result};
use crate::markup::escape;
use crate::model::{
    Alignment, Block, Document, Metadata, Paragraph, Resource, TextRun, POINTS_PER_INCH,
};
use crate::style::StyleName;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resource ID used for the embedded QR code.
pub const QR_RESOURCE_ID: &str = "qr-code";

/// Content parameters for the guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// App name used in titles and file names
    pub app_name: String,

    /// Line under the title
    pub tagline: String,

    /// Person who invited the tester
    pub inviter: String,

    /// Full name for the contact and copyright lines
    pub contact_name: String,

    /// Preview client the tester installs
    pub preview_client: String,

    /// URL the preview client opens
    pub launch_url: String,

    /// QR code image encoding `launch_url`
    pub qr_image: PathBuf,

    /// Rendered QR code width in inches
    pub qr_width_inches: f32,

    /// Events the tester should see after the first sync
    pub events: Vec<SampleEvent>,

    /// Year in the copyright line
    pub copyright_year: i32,
}

impl GuideConfig {
    /// Load a configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a guide cannot be built without.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(Error::Config("app_name must not be empty".into()));
        }
        if self.launch_url.trim().is_empty() {
            return Err(Error::Config("launch_url must not be empty".into()));
        }
        if self.qr_width_inches.is_nan() || self.qr_width_inches <= 0.0 {
            return Err(Error::Config(format!(
                "qr_width_inches must be positive, got {}",
                self.qr_width_inches
            )));
        }
        Ok(())
    }

    /// Default PDF output file name.
    pub fn pdf_file_name(&self) -> String {
        format!("{}-Instructions-WithQR.pdf", self.app_name)
    }

    /// Default Word output file name.
    pub fn docx_file_name(&self) -> String {
        format!("{}-Instructions.docx", self.app_name)
    }

    fn first_event(&self, kind: EventKind) -> Option<&SampleEvent> {
        self.events.iter().find(|e| e.kind == kind)
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            app_name: "GatherSync".into(),
            tagline: "Your Personal Event Coordination Assistant".into(),
            inviter: "Peter".into(),
            contact_name: "Peter Scarfo".into(),
            preview_client: "Expo Go".into(),
            launch_url: "https://8081-ienb1rj930k0x92csc3x6-a41ba8ee.manus-asia.computer".into(),
            qr_image: PathBuf::from("gathersync-qr.png"),
            qr_width_inches: 3.0,
            events: vec![
                SampleEvent::new("AI Guys", "Monthly flexible event", EventKind::Flexible),
                SampleEvent::new("Guru Breakfast", "Monthly event", EventKind::Fixed),
            ],
            copyright_year: 2025,
        }
    }
}

/// An event testers should find after syncing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEvent {
    /// Event name
    pub name: String,
    /// Short description shown next to the name
    pub description: String,
    /// Scheduling kind
    pub kind: EventKind,
}

impl SampleEvent {
    /// Create a sample event.
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: EventKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
        }
    }
}

/// How an event is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Date chosen from participants' availability
    Flexible,
    /// Fixed date with RSVP
    Fixed,
}

/// Build the onboarding guide.
///
/// The QR image is the only fallible input: when it cannot be read or
/// decoded, an italic placeholder note takes its place and the guide is
/// still produced.
pub fn build_guide(config: &GuideConfig) -> Document {
    let mut builder = GuideBuilder::new(config);
    builder.welcome_page();
    builder.connect_page();
    builder.availability_page();
    builder.help_page();
    debug!("built guide with {} blocks", builder.doc.len());
    builder.doc
}

/// Config values escaped for interpolation into markup.
struct MarkupFields {
    app: String,
    client: String,
    inviter: String,
    contact: String,
    tagline: String,
}

impl MarkupFields {
    fn new(config: &GuideConfig) -> Self {
        Self {
            app: escape(&config.app_name).into_owned(),
            client: escape(&config.preview_client).into_owned(),
            inviter: escape(&config.inviter).into_owned(),
            contact: escape(&config.contact_name).into_owned(),
            tagline: escape(&config.tagline).into_owned(),
        }
    }
}

struct GuideBuilder<'a> {
    config: &'a GuideConfig,
    doc: Document,
}

impl<'a> GuideBuilder<'a> {
    fn new(config: &'a GuideConfig) -> Self {
        let mut doc = Document::new();
        doc.metadata = Metadata {
            title: Some(format!("{} Beta Tester Instructions", config.app_name)),
            author: Some(config.contact_name.clone()),
            subject: Some(format!("Getting started with {}", config.app_name)),
            keywords: Some(format!(
                "{}, {}, beta, onboarding",
                config.app_name, config.preview_client
            )),
            creator: Some(format!("betaguide {}", env!("CARGO_PKG_VERSION"))),
            created: None,
        };
        Self { config, doc }
    }

    fn spacer(&mut self, inches: f32) {
        self.doc.push(Block::spacer_inches(inches));
    }

    fn para(&mut self, style: StyleName, markup: &str) {
        self.doc.add_paragraph(Paragraph::markup(style, markup));
    }

    fn body(&mut self, markup: &str) {
        self.para(StyleName::Body, markup);
    }

    fn numbered(&mut self, items: &[String]) {
        self.numbered_from(1, items);
    }

    fn numbered_from(&mut self, start: u32, items: &[String]) {
        for (i, item) in items.iter().enumerate() {
            self.doc
                .add_paragraph(Paragraph::numbered(start + i as u32, item));
        }
    }

    fn bullets(&mut self, level: u8, items: &[String]) {
        for item in items {
            self.doc.add_paragraph(Paragraph::bullet(level, item));
        }
    }

    fn welcome_page(&mut self) {
        let c = self.config;
        let f = MarkupFields::new(c);
        let client = &f.client;

        self.spacer(0.5);
        self.para(StyleName::Title, &format!("Welcome to {}! 🎉", f.app));
        self.spacer(0.1);
        self.para(StyleName::Subtitle, &f.tagline);
        self.spacer(0.3);
        self.body(&format!(
            "{} has invited you to test {} - a new app designed to make coordinating \
             group events easier. This app helps you find the perfect date when everyone \
             is available.",
            f.inviter, f.app
        ));
        self.spacer(0.4);

        self.para(StyleName::Heading, "Quick Start Guide");
        self.spacer(0.2);

        self.para(StyleName::Subheading, &format!("Step 1: Install {}", client));
        for (platform, store) in [("iPhone", "App Store"), ("Android", "Google Play Store")] {
            self.para(StyleName::Label, &format!("{} Users:", platform));
            self.numbered(&[
                format!("Open the <b>{}</b>", store),
                format!("Search for <b>\"{}\"</b>", client),
                "Install the app (it's free)".to_string(),
            ]);
            self.spacer(0.1);
        }
        self.spacer(0.2);

        self.para(StyleName::Subheading, &format!("Step 2: Open {}", f.app));
        self.para(StyleName::Label, "Option A: Scan the QR Code (Easiest!)");
        self.numbered(&[
            format!("Open the <b>{}</b> app", client),
            "Tap <b>\"Scan QR code\"</b>".to_string(),
            "Point your camera at the QR code below:".to_string(),
        ]);
        self.spacer(0.2);
        self.qr_code();
        self.spacer(0.3);
        self.doc.push(Block::PageBreak);
    }

    fn qr_code(&mut self) {
        let c = self.config;
        match Resource::from_path(&c.qr_image) {
            Ok(resource) => {
                let width = c.qr_width_inches * POINTS_PER_INCH;
                let height = width * resource.aspect_ratio();
                debug!(
                    "embedding QR code {} ({}x{} px)",
                    c.qr_image.display(),
                    resource.width,
                    resource.height
                );
                self.doc.add_resource(QR_RESOURCE_ID, resource);
                self.doc.push(Block::Image {
                    resource_id: QR_RESOURCE_ID.to_string(),
                    alt_text: Some(format!("QR code for {}", c.launch_url)),
                    width,
                    height,
                    alignment: Alignment::Center,
                });
            }
            Err(e) => {
                warn!(
                    "QR code image {} unavailable, using placeholder: {}",
                    c.qr_image.display(),
                    e
                );
                let mut note = Paragraph::new();
                note.add_run(TextRun::italic(format!("QR Code image not found: {}", e)));
                self.doc.add_paragraph(note);
            }
        }
    }

    fn connect_page(&mut self) {
        let c = self.config;
        let f = MarkupFields::new(c);
        let client = &f.client;

        self.para(StyleName::Label, "Option B: Enter URL Manually");
        self.numbered(&[
            format!("Open the <b>{}</b> app", client),
            "Tap <b>\"Enter URL manually\"</b> at the bottom".to_string(),
            "Copy and paste this URL:".to_string(),
        ]);
        self.spacer(0.1);
        let mut url = Paragraph::new();
        url.style.name = StyleName::Code;
        url.add_link(c.launch_url.clone(), c.launch_url.clone());
        self.doc.add_paragraph(url);
        self.spacer(0.1);
        self.numbered_from(4, &["Tap <b>\"Connect\"</b>".to_string()]);
        self.spacer(0.3);

        self.para(StyleName::Subheading, "Step 3: Log In to Enable Cloud Sync");
        self.numbered(&[
            format!(
                "When {} opens, you'll see a <b>\"Cloud Sync Available\"</b> banner",
                f.app
            ),
            "Tap the <b>\"Log In\"</b> button".to_string(),
            "<b>Create an account</b> or use <b>OAuth</b> (Google/GitHub)".to_string(),
            "After logging in, you'll be redirected back to the app".to_string(),
        ]);
        self.spacer(0.3);

        self.para(StyleName::Subheading, "Step 4: Sync Your Events");
        let event_count = c.events.len();
        self.numbered(&[
            "You should now see <b>\"Cloud sync enabled\"</b> banner (green)".to_string(),
            "Tap the <b>\"Sync Now\"</b> button".to_string(),
            "Wait 10-20 seconds while syncing".to_string(),
            format!(
                "<b>You should see {} event{} appear:</b>",
                event_count,
                if event_count == 1 { "" } else { "s" }
            ),
        ]);
        let events: Vec<String> = c
            .events
            .iter()
            .map(|e| {
                format!(
                    "<b>{}</b> - {}",
                    escape(&e.name),
                    escape(&e.description)
                )
            })
            .collect();
        self.bullets(1, &events);
        self.spacer(0.3);
        self.doc.push(Block::PageBreak);
    }

    fn availability_page(&mut self) {
        let c = self.config;
        let f = MarkupFields::new(c);

        self.para(StyleName::Subheading, "Step 5: Mark Your Availability");
        self.spacer(0.1);

        if let Some(event) = c.first_event(EventKind::Flexible) {
            self.para(
                StyleName::Label,
                &format!("For Flexible Events ({}):", escape(&event.name)),
            );
            self.numbered(&[
                format!("Tap on the <b>{}</b> event", escape(&event.name)),
                "Find your name in the participants list".to_string(),
                "Tap on your name".to_string(),
                "Mark the dates you're <b>available</b> or <b>unavailable</b>".to_string(),
                "The app will help find the best date when most people can attend".to_string(),
            ]);
            self.spacer(0.2);
        }

        if let Some(event) = c.first_event(EventKind::Fixed) {
            self.para(
                StyleName::Label,
                &format!("For Fixed Events ({}):", escape(&event.name)),
            );
            self.numbered(&[
                format!("Tap on the <b>{}</b> event", escape(&event.name)),
                "Find your name in the participants list".to_string(),
                "Tap on your name".to_string(),
                "Select your RSVP status:".to_string(),
            ]);
            self.bullets(
                1,
                &[
                    "✅ <b>Attending</b>".to_string(),
                    "❌ <b>Not Attending</b>".to_string(),
                    "❓ <b>No Response</b> (default)".to_string(),
                ],
            );
            self.spacer(0.3);
        }

        self.para(StyleName::Subheading, "Step 6: Sync Your Changes");
        self.body("After marking your availability or RSVP:");
        self.numbered(&[
            "Go back to the <b>Events</b> list (tap the back arrow)".to_string(),
            "Tap <b>\"Sync Now\"</b> again".to_string(),
            "Your responses will be uploaded to the cloud".to_string(),
            "Everyone else will see your updates when they sync".to_string(),
        ]);
        self.spacer(0.4);

        self.para(StyleName::Heading, "Important Tips");
        self.bullets(
            0,
            &[
                "✅ <b>Always sync after making changes</b> - Your availability/RSVP won't be \
                 shared until you tap \"Sync Now\""
                    .to_string(),
                "✅ <b>Sync regularly to see updates</b> - Other people's responses will appear \
                 when you sync"
                    .to_string(),
                format!(
                    "✅ <b>Keep {} installed</b> - You'll need it to access {} until we release \
                     the standalone app",
                    f.client, f.app
                ),
                "✅ <b>Internet connection required</b> - Syncing requires an active internet \
                 connection"
                    .to_string(),
            ],
        );
        self.spacer(0.4);
        self.doc.push(Block::PageBreak);
    }

    fn help_page(&mut self) {
        let c = self.config;
        let f = MarkupFields::new(c);

        self.para(StyleName::Heading, "Need Help?");
        self.body("If you encounter any issues:");
        self.numbered(&[
            format!(
                "<b>Force close and reopen</b> - Swipe up from app switcher and reopen {}",
                f.client
            ),
            "<b>Check your internet connection</b> - Sync requires WiFi or mobile data"
                .to_string(),
            format!(
                "<b>Contact {0}</b> - {0} is testing this app and wants your feedback!",
                f.inviter
            ),
        ]);
        self.spacer(0.4);

        self.para(StyleName::Heading, "What to Test");
        self.body(&format!("{} would love your feedback on:", f.inviter));
        self.bullets(
            0,
            &[
                "✅ Does the app load correctly?".to_string(),
                "✅ Can you see the events after syncing?".to_string(),
                "✅ Can you mark your availability/RSVP?".to_string(),
                "✅ Do your changes sync back to other users?".to_string(),
                "✅ Is the app easy to use?".to_string(),
                "✅ What features would make it more useful?".to_string(),
            ],
        );
        self.spacer(0.4);

        self.para(StyleName::Heading, "Privacy &amp; Data");
        self.bullets(
            0,
            &[
                "Your data is stored securely in the cloud".to_string(),
                "Only members of your events can see your responses".to_string(),
                "You can delete your account and data at any time".to_string(),
                "This is a test version - please don't enter sensitive information".to_string(),
            ],
        );
        self.spacer(0.8);

        self.para(
            StyleName::Subtitle,
            &format!("<b>Thank you for testing {}!</b>", f.app),
        );
        self.doc.add_paragraph(
            Paragraph::markup(
                StyleName::Body,
                "Your feedback will help make this app better for everyone.",
            )
            .aligned(Alignment::Center),
        );
        self.spacer(0.2);
        self.doc.add_paragraph(
            Paragraph::markup(
                StyleName::Body,
                &format!("<i>Questions? Contact {}</i>", f.contact),
            )
            .aligned(Alignment::Center),
        );
        self.spacer(0.3);
        self.para(
            StyleName::Fine,
            &format!(
                "© {} {}. All rights reserved.",
                c.copyright_year, f.contact
            ),
        );
    }
}
