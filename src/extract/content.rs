//! Extractors for the secondary content types: FAQs, reviews, team members,
//! and the fixed set of static pages.

use scraper::{ElementRef, Selector};

use super::urls::normalize_image_url;
use crate::mirror::{collapse_ws, MirrorPage};
use crate::models::{Faq, Review, StaticPage, TeamMember};
use crate::report::JobReport;
use crate::sanitize::Sanitizer;

/// Mirror paths tried for each single-page entity type, in order.
pub const FAQ_PAGES: &[&str] = &["faqs", "faq"];
pub const REVIEW_PAGES: &[&str] = &["reviews", "testimonials"];
pub const TEAM_PAGES: &[&str] = &["team", "about/our-team"];

/// The static pages worth carrying over, by slug.
pub const STATIC_PAGE_SLUGS: &[&str] = &[
    "about",
    "contact",
    "financing",
    "warranty",
    "shipping-policy",
    "privacy-policy",
    "sell-your-laser",
];

pub struct ContentExtractor {
    site_base: String,
    sanitizer: Sanitizer,
    accordion_item: Selector,
    accordion_label: Selector,
    accordion_content: Selector,
    review_block: Selector,
    review_body: Selector,
    review_author: Selector,
    review_star: Selector,
    team_block: Selector,
    team_name: Selector,
    team_role: Selector,
    team_bio: Selector,
    team_photo: Selector,
}

impl ContentExtractor {
    pub fn new(site_base: &str) -> Self {
        let parse = |css: &str| Selector::parse(css).expect("static selector");
        Self {
            site_base: site_base.to_string(),
            sanitizer: Sanitizer::new(),
            accordion_item: parse(".fl-accordion-item"),
            accordion_label: parse(".fl-accordion-button-label"),
            accordion_content: parse(".fl-accordion-content"),
            review_block: parse(".pp-review, .fl-testimonial, .testimonial"),
            review_body: parse("blockquote, .testimonial-text, .pp-review-text"),
            review_author: parse("cite, .testimonial-author, .pp-review-author"),
            review_star: parse(".dashicons-star-filled, .star-filled, .fa-star"),
            team_block: parse(".team-member, .pp-infobox"),
            team_name: parse(".team-member-name, .pp-infobox-title, h3"),
            team_role: parse(".team-member-role, .pp-infobox-subtitle"),
            team_bio: parse("p"),
            team_photo: parse("img"),
        }
    }

    /// Question/answer pairs from the FAQ accordion, in page order.
    pub fn faqs(&self, page: &MirrorPage, report: &mut JobReport) -> Vec<Faq> {
        let mut faqs = Vec::new();
        for item in page.document.select(&self.accordion_item) {
            let question = item
                .select(&self.accordion_label)
                .next()
                .map(|el| collapse_ws(&el.text().collect::<String>()))
                .unwrap_or_default();
            if question.is_empty() {
                report.warn("accordion item without a question label, skipped");
                continue;
            }
            let answer = item
                .select(&self.accordion_content)
                .next()
                .map(|el| self.sanitizer.clean_fragment(el))
                .unwrap_or_default();
            if answer.is_empty() {
                report.field_missing("answer");
            }
            faqs.push(Faq {
                question,
                answer,
                sort_order: faqs.len() as u32,
            });
        }
        faqs
    }

    pub fn reviews(&self, page: &MirrorPage, report: &mut JobReport) -> Vec<Review> {
        let mut reviews = Vec::new();
        for block in page.document.select(&self.review_block) {
            let body = block
                .select(&self.review_body)
                .next()
                .map(|el| collapse_ws(&el.text().collect::<String>()))
                .unwrap_or_else(|| collapse_ws(&block.text().collect::<String>()));
            if body.is_empty() {
                report.warn("testimonial block without text, skipped");
                continue;
            }
            let author = block
                .select(&self.review_author)
                .next()
                .map(|el| collapse_ws(&el.text().collect::<String>()))
                .filter(|s| !s.is_empty());
            if author.is_none() {
                report.field_missing("author");
            }
            let stars = block.select(&self.review_star).count();
            reviews.push(Review {
                author,
                body,
                rating: if stars > 0 { Some(stars.min(5) as u8) } else { None },
                source: block
                    .value()
                    .attr("data-source")
                    .map(str::to_string),
            });
        }
        reviews
    }

    pub fn team(&self, page: &MirrorPage, report: &mut JobReport) -> Vec<TeamMember> {
        let mut members = Vec::new();
        for block in page.document.select(&self.team_block) {
            let name = block
                .select(&self.team_name)
                .next()
                .map(|el| collapse_ws(&el.text().collect::<String>()))
                .unwrap_or_default();
            if name.is_empty() {
                report.warn("team block without a name, skipped");
                continue;
            }
            let role = block
                .select(&self.team_role)
                .next()
                .map(|el| collapse_ws(&el.text().collect::<String>()))
                .filter(|s| !s.is_empty());
            let bio = block
                .select(&self.team_bio)
                .map(|el| collapse_ws(&el.text().collect::<String>()))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n");
            let photo = block
                .select(&self.team_photo)
                .next()
                .and_then(|img| best_img_src(img))
                .and_then(|raw| normalize_image_url(&raw, &self.site_base));
            if photo.is_none() {
                report.field_missing("photo");
            }
            members.push(TeamMember {
                name,
                role,
                bio: if bio.is_empty() { None } else { Some(bio) },
                photo,
                sort_order: members.len() as u32,
            });
        }
        members
    }

    pub fn static_page(
        &self,
        page: &MirrorPage,
        slug: &str,
        report: &mut JobReport,
    ) -> StaticPage {
        let title = page
            .first_text(&["h1.fl-heading", "h1.entry-title", "h1"])
            .or_else(|| page.meta_content("meta[property=\"og:title\"]"))
            .or_else(|| page.title_tag())
            .unwrap_or_default();
        if title.is_empty() {
            report.field_missing("title");
        }
        let body = self.sanitizer.clean_document(&page.document);
        if body.is_empty() {
            report.field_missing("body");
        }
        StaticPage {
            slug: slug.to_string(),
            title,
            body,
            meta_title: page.title_tag(),
            meta_description: page.meta_content("meta[name=\"description\"]"),
        }
    }
}

fn best_img_src(img: ElementRef) -> Option<String> {
    let value = img.value();
    value
        .attr("data-src")
        .or_else(|| value.attr("src"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page_from(html: &str) -> MirrorPage {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("page");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.html"), html).unwrap();
        MirrorPage::load(&dir).unwrap()
    }

    #[test]
    fn faqs_keep_page_order() {
        let page = page_from(
            "<body>\
             <div class=\"fl-accordion-item\">\
               <span class=\"fl-accordion-button-label\">Do you ship freight?</span>\
               <div class=\"fl-accordion-content\"><p>Yes, worldwide.</p></div>\
             </div>\
             <div class=\"fl-accordion-item\">\
               <span class=\"fl-accordion-button-label\">Warranty?</span>\
               <div class=\"fl-accordion-content\"><p>Six months.</p></div>\
             </div></body>",
        );
        let mut report = JobReport::default();
        let faqs = ContentExtractor::new("https://x.test").faqs(&page, &mut report);
        assert_eq!(faqs.len(), 2);
        assert_eq!(faqs[0].question, "Do you ship freight?");
        assert_eq!(faqs[0].sort_order, 0);
        assert_eq!(faqs[1].sort_order, 1);
        assert!(faqs[1].answer.contains("Six months."));
    }

    #[test]
    fn reviews_count_stars() {
        let page = page_from(
            "<body><div class=\"testimonial\">\
             <blockquote>Great machine.</blockquote>\
             <cite>Dr. Reyes</cite>\
             <span class=\"star-filled\"></span><span class=\"star-filled\"></span>\
             </div></body>",
        );
        let mut report = JobReport::default();
        let reviews = ContentExtractor::new("https://x.test").reviews(&page, &mut report);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].author.as_deref(), Some("Dr. Reyes"));
        assert_eq!(reviews[0].rating, Some(2));
    }

    #[test]
    fn team_members_extracted_in_order() {
        let page = page_from(
            "<body>\
             <div class=\"team-member\">\
               <h3 class=\"team-member-name\">Ana Flores</h3>\
               <div class=\"team-member-role\">Service Lead</div>\
               <p>Fifteen years of field repair.</p>\
               <img src=\"/wp-content/uploads/ana-150x150.jpg\">\
             </div></body>",
        );
        let mut report = JobReport::default();
        let team = ContentExtractor::new("https://x.test").team(&page, &mut report);
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].name, "Ana Flores");
        assert_eq!(team[0].role.as_deref(), Some("Service Lead"));
        assert_eq!(
            team[0].photo.as_deref(),
            Some("https://x.test/wp-content/uploads/ana.jpg")
        );
    }

    #[test]
    fn static_page_has_sanitized_body() {
        let page = page_from(
            "<head><title>Financing | Store</title></head>\
             <body><h1>Financing</h1><div class=\"fl-rich-text\">\
             <p>Approvals in 24 hours.</p><script>t()</script></div></body>",
        );
        let mut report = JobReport::default();
        let out = ContentExtractor::new("https://x.test").static_page(&page, "financing", &mut report);
        assert_eq!(out.title, "Financing");
        assert!(out.body.contains("Approvals in 24 hours."));
        assert!(!out.body.contains("script"));
        assert_eq!(out.meta_title.as_deref(), Some("Financing | Store"));
    }
}
