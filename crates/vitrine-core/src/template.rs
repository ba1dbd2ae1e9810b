//! Built-in template pages
//!
//! Page content is inert data. The interaction layer only consumes it (works
//! are filtered, FAQs disclosed, gallery media shown in the lightbox).

use serde::Serialize;

use crate::error::{Error, Result};
use crate::ui::Categorized;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
}

/// Animated headline number
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: f64,
    pub suffix: &'static str,
}

/// Filterable grid entry (portfolio piece, menu dish, course module)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Work {
    pub title: &'static str,
    pub category: &'static str,
    pub blurb: &'static str,
}

impl Categorized for Work {
    fn category(&self) -> &str {
        self.category
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Lightbox item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Media {
    pub caption: &'static str,
    pub alt: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub info: TemplateInfo,
    pub nav: Vec<&'static str>,
    pub cta: &'static str,
    pub stats: Vec<Stat>,
    pub works_heading: &'static str,
    pub works: Vec<Work>,
    pub faqs: Vec<Faq>,
    pub gallery: Vec<Media>,
    pub steps: Vec<&'static str>,
}

const CATALOGUE: &[TemplateInfo] = &[
    TemplateInfo {
        name: "restaurant",
        title: "Ember & Oak",
        tagline: "Wood-fired seasonal kitchen",
    },
    TemplateInfo {
        name: "salon",
        title: "Studio Fern",
        tagline: "Cuts, colour and calm",
    },
    TemplateInfo {
        name: "course",
        title: "Shipwright Academy",
        tagline: "Learn to build production web apps",
    },
    TemplateInfo {
        name: "agency",
        title: "Northlight",
        tagline: "Brand and product design studio",
    },
    TemplateInfo {
        name: "photographer",
        title: "Mira Okafor Photography",
        tagline: "Weddings, portraits and editorial",
    },
];

/// Every built-in template
pub fn catalogue() -> &'static [TemplateInfo] {
    CATALOGUE
}

/// Page content for a template by name
pub fn load(name: &str) -> Result<Page> {
    let info = CATALOGUE
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .copied()
        .ok_or_else(|| Error::UnknownTemplate(name.to_string()))?;

    let page = match info.name {
        "restaurant" => restaurant(info),
        "salon" => salon(info),
        "course" => course(info),
        "agency" => agency(info),
        _ => photographer(info),
    };
    Ok(page)
}

fn work(title: &'static str, category: &'static str, blurb: &'static str) -> Work {
    Work { title, category, blurb }
}

fn faq(question: &'static str, answer: &'static str) -> Faq {
    Faq { question, answer }
}

fn media(caption: &'static str, alt: &'static str) -> Media {
    Media { caption, alt }
}

fn stat(label: &'static str, value: f64, suffix: &'static str) -> Stat {
    Stat { label, value, suffix }
}

fn restaurant(info: TemplateInfo) -> Page {
    Page {
        info,
        nav: vec!["Menu", "Story", "Gallery", "Reservations"],
        cta: "Book a table",
        stats: vec![
            stat("Years on the hearth", 12.0, ""),
            stat("Local growers", 28.0, ""),
            stat("Covers a night", 90.0, "+"),
        ],
        works_heading: "Menu",
        works: vec![
            work("Charred leeks", "Starters", "Hazelnut romesco, aged sheep's cheese"),
            work("Smoked trout rillettes", "Starters", "Pickled cucumber, rye crisp"),
            work("Dry-aged sirloin", "Mains", "Bone marrow butter, ember potatoes"),
            work("Wild mushroom risotto", "Mains", "Brown butter, crispy sage"),
            work("Burnt honey tart", "Desserts", "Crème fraîche, thyme"),
            work("Orchard sour", "Drinks", "Apple brandy, lemon, egg white"),
        ],
        faqs: vec![
            faq("Do you take walk-ins?", "Yes, the bar is kept for walk-ins every evening."),
            faq("Can you cater for allergies?", "Tell us when booking and the kitchen will adapt the menu."),
            faq("Is there a set menu?", "A six-course tasting menu runs Thursday to Saturday."),
            faq("Do you host private events?", "The cellar room seats up to 18 guests."),
            faq("Is parking available?", "Street parking is free after 6pm."),
        ],
        gallery: vec![
            media("The hearth at service", "Open fire grill with flames"),
            media("Dining room", "Long oak tables under pendant lights"),
            media("Charred leeks", "Plated leeks with orange sauce"),
            media("Cellar room", "Private dining room with wine racks"),
        ],
        steps: vec!["Date & time", "Party size", "Details", "Confirm"],
    }
}

fn salon(info: TemplateInfo) -> Page {
    Page {
        info,
        nav: vec!["Services", "Team", "Gallery", "Book"],
        cta: "Book an appointment",
        stats: vec![
            stat("Stylists", 7.0, ""),
            stat("Five-star reviews", 640.0, "+"),
            stat("Plastic-free since", 2019.0, ""),
        ],
        works_heading: "Services",
        works: vec![
            work("Signature cut", "Hair", "Consultation, wash, cut and finish"),
            work("Balayage", "Colour", "Hand-painted lightening with toner"),
            work("Gloss refresh", "Colour", "Shine and tone between appointments"),
            work("Scalp ritual", "Care", "Exfoliation and massage treatment"),
            work("Bridal styling", "Events", "Trial and on-the-day styling"),
        ],
        faqs: vec![
            faq("How early should I book?", "Two weeks ahead for weekends, a few days for weekdays."),
            faq("Do you offer patch tests?", "Colour clients need a patch test 48 hours before."),
            faq("What is your cancellation policy?", "Please give 24 hours notice to avoid a fee."),
        ],
        gallery: vec![
            media("Copper balayage", "Long wavy copper hair"),
            media("Textured bob", "Short layered bob from the side"),
            media("The studio", "Bright salon with plants and mirrors"),
        ],
        steps: vec!["Service", "Stylist", "Time", "Confirm"],
    }
}

fn course(info: TemplateInfo) -> Page {
    Page {
        info,
        nav: vec!["Curriculum", "Mentors", "Pricing", "FAQ"],
        cta: "Join the next cohort",
        stats: vec![
            stat("Graduates", 1200.0, "+"),
            stat("Hiring partners", 85.0, ""),
            stat("Completion rate", 92.0, "%"),
        ],
        works_heading: "Curriculum",
        works: vec![
            work("HTTP from scratch", "Foundations", "Requests, responses and caching"),
            work("Relational data", "Foundations", "Schemas, indexes and migrations"),
            work("Component design", "Frontend", "State, effects and accessibility"),
            work("Motion that respects users", "Frontend", "Reveals, transitions, reduced motion"),
            work("Queues and workers", "Backend", "Background jobs and retries"),
            work("Shipping to production", "Backend", "Observability and deploys"),
            work("Capstone", "Project", "Build and launch a real product"),
        ],
        faqs: vec![
            faq("Do I need experience?", "Basic programming knowledge is enough to start."),
            faq("How many hours per week?", "Plan for twelve to fifteen hours."),
            faq("Is it live or recorded?", "Live workshops with recordings for every session."),
            faq("Can I pay in instalments?", "Yes, over three or six months."),
            faq("What if I fall behind?", "You can defer to the next cohort once for free."),
            faq("Do I get a certificate?", "Yes, after completing the capstone."),
        ],
        gallery: vec![
            media("Demo day", "Students presenting on stage"),
            media("Pairing session", "Two people at one laptop"),
        ],
        steps: vec!["Background", "Goals", "Schedule", "Payment"],
    }
}

fn agency(info: TemplateInfo) -> Page {
    Page {
        info,
        nav: vec!["Work", "Services", "Studio", "Contact"],
        cta: "Start a project",
        stats: vec![
            stat("Launches", 140.0, ""),
            stat("Countries", 19.0, ""),
            stat("Client retention", 87.0, "%"),
        ],
        works_heading: "Selected work",
        works: vec![
            work("Harbour Bank", "Branding", "Identity system for a cooperative bank"),
            work("Atlas Maps", "Product", "Offline-first navigation app"),
            work("Kiln Ceramics", "Branding", "Packaging and e-commerce"),
            work("Orbit Health", "Product", "Patient onboarding redesign"),
            work("Tidal Festival", "Motion", "Title sequence and social kit"),
            work("Lumen Labs", "Web", "Marketing site with live demos"),
            work("Fieldnotes", "Web", "Editorial platform for researchers"),
        ],
        faqs: vec![
            faq("What does a typical project cost?", "Most engagements start from a four-week sprint."),
            faq("Do you work with startups?", "Yes, we keep two slots a quarter for early-stage teams."),
            faq("Who owns the work?", "You do, on final payment."),
            faq("Can you work with our developers?", "We hand off design systems with documented tokens."),
        ],
        gallery: vec![
            media("Harbour Bank identity", "Navy logo on business cards"),
            media("Atlas Maps screens", "Three phone screens showing maps"),
            media("Kiln packaging", "Boxes with clay-coloured labels"),
            media("Tidal Festival titles", "Bold animated typography frame"),
            media("Studio space", "Open-plan studio with pin boards"),
            media("Workshop", "Team sketching on a whiteboard"),
            media("Lumen Labs site", "Laptop showing a product page"),
            media("Fieldnotes reader", "Article layout on a tablet"),
        ],
        steps: vec!["Project type", "Budget", "Timeline", "Contact"],
    }
}

fn photographer(info: TemplateInfo) -> Page {
    Page {
        info,
        nav: vec!["Portfolio", "About", "Packages", "Enquire"],
        cta: "Check your date",
        stats: vec![
            stat("Weddings", 310.0, ""),
            stat("Published features", 42.0, ""),
            stat("Years behind the lens", 15.0, ""),
        ],
        works_heading: "Portfolio",
        works: vec![
            work("Coastal elopement", "Weddings", "Cliff-top ceremony at dawn"),
            work("City hall", "Weddings", "Intimate civil ceremony"),
            work("Ada, 90", "Portraits", "A family commission"),
            work("The potters", "Editorial", "Magazine feature on craft"),
            work("Founders", "Portraits", "Headshots for a design studio"),
        ],
        faqs: vec![
            faq("How far do you travel?", "Anywhere; travel is quoted per booking."),
            faq("When do we get our photos?", "A preview in a week, the full gallery in six."),
            faq("Do you offer albums?", "Handmade linen albums in two sizes."),
        ],
        gallery: vec![
            media("First look", "Couple laughing on a cliff path"),
            media("Confetti", "Guests throwing petals"),
            media("Ada", "Black and white portrait of an elderly woman"),
            media("Studio wheel", "Hands shaping clay"),
            media("Golden hour", "Silhouettes against the sea"),
        ],
        steps: vec!["Date", "Package", "Details", "Send"],
    }
}
