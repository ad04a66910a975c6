use std::fmt::{self, Display};

use xmlwriter::{Indent, Options, XmlWriter};

use crate::activity::GamePromoAsset;
use crate::profile::{PresenceState, Profile};
use crate::utils::{format_last_seen, xml_escape};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const WIDTH: u32 = 500;
const FONT: &str = "Segoe UI, system-ui, sans-serif";
const PLACEHOLDER_NAME: &str = "Steam User";

enum Node {
    Element(Element),
    Text(String),
}

/// A drawing primitive. Attribute values and text are stored raw and only
/// escaped when the tree is written out.
pub struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Display) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    fn write(&self, xml: &mut XmlWriter) {
        xml.start_element(self.name);
        for (name, value) in &self.attributes {
            xml.write_attribute(name, &xml_escape(value));
        }

        // Text stays on the element's line so it renders without stray whitespace.
        let text_only = !self.children.is_empty()
            && self.children.iter().all(|c| matches!(c, Node::Text(_)));
        if text_only {
            xml.set_preserve_whitespaces(true);
        }

        for child in &self.children {
            match child {
                Node::Element(element) => element.write(xml),
                Node::Text(text) => xml.write_text(&xml_escape(text)),
            }
        }

        xml.end_element();
        if text_only {
            xml.set_preserve_whitespaces(false);
        }
    }

    pub fn to_xml(&self) -> String {
        let mut xml = XmlWriter::new(Options {
            use_single_quote: false,
            indent: Indent::Spaces(2),
            attributes_indent: Indent::None,
        });
        self.write(&mut xml);
        xml.end_document()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Playing(String),
    Online,
    Offline,
}

impl Status {
    fn color(&self) -> &'static str {
        match self {
            Status::Playing(_) => "#66ff66",
            Status::Online => "#4CAF50",
            Status::Offline => "#9e9e9e",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Playing(title) => write!(f, "Playing {}", title),
            Status::Online => f.write_str("Online"),
            Status::Offline => f.write_str("Offline"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Idle,
    InGame,
}

impl Layout {
    pub fn height(self) -> u32 {
        match self {
            Layout::Idle => 180,
            Layout::InGame => 220,
        }
    }
}

pub struct Badge<'a> {
    pub profile: &'a Profile,
    pub promo: Option<&'a GamePromoAsset>,
}

impl<'a> Badge<'a> {
    pub fn new(profile: &'a Profile, promo: Option<&'a GamePromoAsset>) -> Self {
        Self { profile, promo }
    }

    pub fn layout(&self) -> Layout {
        if self.profile.summary.is_in_game() {
            Layout::InGame
        } else {
            Layout::Idle
        }
    }

    pub fn status(&self) -> Status {
        let summary = &self.profile.summary;
        match (&summary.active_game_title, summary.presence_state) {
            (Some(title), _) => Status::Playing(title.clone()),
            (None, Some(PresenceState::Online)) => Status::Online,
            _ => Status::Offline,
        }
    }

    pub fn to_svg(&self) -> String {
        self.build().to_xml()
    }

    fn build(&self) -> Element {
        let summary = &self.profile.summary;
        let height = self.layout().height();
        let status = self.status();
        let band = self
            .promo
            .zip(summary.active_game_title.as_deref())
            .filter(|_| self.layout() == Layout::InGame);

        let name = if summary.display_name.trim().is_empty() {
            PLACEHOLDER_NAME
        } else {
            summary.display_name.as_str()
        };

        let mut defs = Element::new("defs")
            .child(
                Element::new("linearGradient")
                    .attr("id", "bg")
                    .attr("x1", "0%")
                    .attr("y1", "0%")
                    .attr("x2", "100%")
                    .attr("y2", "100%")
                    .child(stop("0%", "#0f0f0f"))
                    .child(stop("100%", "#1a1a1a")),
            )
            .child(
                Element::new("clipPath")
                    .attr("id", "avatarClip")
                    .child(circle(60, 60, 45)),
            );
        if band.is_some() {
            defs = defs.child(
                Element::new("clipPath")
                    .attr("id", "gameClip")
                    .child(band_rect()),
            );
        }

        let mut svg = Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("width", WIDTH)
            .attr("height", height)
            .attr("viewBox", format!("0 0 {} {}", WIDTH, height))
            .child(defs)
            .child(
                Element::new("rect")
                    .attr("width", WIDTH)
                    .attr("height", height)
                    .attr("fill", "url(#bg)")
                    .attr("rx", 16),
            )
            .child(self.avatar())
            .child(
                circle(60, 60, 47)
                    .attr("fill", "none")
                    .attr("stroke", status.color())
                    .attr("stroke-width", 3),
            )
            .child(
                label(120, 45, 20, "#ffffff")
                    .attr("font-weight", 600)
                    .text(name),
            )
            .child(label(120, 70, 15, "#4CAF50").text(format!(
                "Level {} \u{2022} {} games",
                self.profile.level.level, self.profile.owned_games.count
            )))
            .child(label(120, 95, 14, status.color()).text(status.to_string()))
            .child(label(120, 115, 12, "#aaaaaa").text(format!(
                "Last online: {}",
                format_last_seen(summary.last_seen)
            )));

        if let Some((promo, title)) = band {
            svg = svg.children([
                Element::new("image")
                    .attr("href", &promo.image_url)
                    .attr("x", 20)
                    .attr("y", 130)
                    .attr("width", 460)
                    .attr("height", 75)
                    .attr("clip-path", "url(#gameClip)")
                    .attr("preserveAspectRatio", "xMidYMid slice"),
                band_rect().attr("fill", "#00000060"),
                label(30, 190, 16, "#ffffff")
                    .attr("font-weight", 600)
                    .text(title),
            ]);
        }

        svg.child(circle(460, 40, 12).attr("fill", "#00bfff"))
            .child(
                label(454, 46, 14, "#ffffff")
                    .attr("font-weight", "bold")
                    .text("S"),
            )
    }

    fn avatar(&self) -> Element {
        let url = self.profile.summary.avatar_url.trim();
        if url.is_empty() {
            return circle(60, 60, 40).attr("fill", "#3a3a3a");
        }

        Element::new("image")
            .attr("href", url)
            .attr("x", 20)
            .attr("y", 20)
            .attr("width", 80)
            .attr("height", 80)
            .attr("clip-path", "url(#avatarClip)")
    }
}

fn stop(offset: &str, color: &str) -> Element {
    Element::new("stop")
        .attr("offset", offset)
        .attr("stop-color", color)
}

fn circle(cx: u32, cy: u32, r: u32) -> Element {
    Element::new("circle")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("r", r)
}

fn band_rect() -> Element {
    Element::new("rect")
        .attr("x", 20)
        .attr("y", 130)
        .attr("width", 460)
        .attr("height", 75)
        .attr("rx", 8)
}

fn label(x: u32, y: u32, size: u32, fill: &str) -> Element {
    Element::new("text")
        .attr("x", x)
        .attr("y", y)
        .attr("font-family", FONT)
        .attr("font-size", size)
        .attr("fill", fill)
}
