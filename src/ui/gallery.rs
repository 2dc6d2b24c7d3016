use iced::widget::{button, column, pick_list, row, scrollable, text, text_input, Column};
use iced::{Alignment, Element, Length, Theme};
use iced_aw::Wrap;
use std::fmt;

use crate::state::data::Product;
use crate::state::filter::FilterCriteria;
use crate::state::session::Session;
use crate::ui::MUTED_COLOR;
use crate::Message;

const CARD_WIDTH: f32 = 260.0;

/// Entry in the brand picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandOption {
    All,
    Brand(String),
}

impl BrandOption {
    pub fn from_filter(brand: Option<&str>) -> Self {
        match brand {
            Some(brand) => BrandOption::Brand(brand.to_string()),
            None => BrandOption::All,
        }
    }

    pub fn into_filter(self) -> Option<String> {
        match self {
            BrandOption::All => None,
            BrandOption::Brand(brand) => Some(brand),
        }
    }
}

impl fmt::Display for BrandOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandOption::All => f.write_str("All brands"),
            BrandOption::Brand(brand) => f.write_str(brand),
        }
    }
}

/// Options for the brand picker, built from the full catalog
pub fn brand_options(brands: &[&str]) -> Vec<BrandOption> {
    std::iter::once(BrandOption::All)
        .chain(brands.iter().map(|b| BrandOption::Brand(b.to_string())))
        .collect()
}

/// Reset both filters, only offered while one of them is set
fn clear_filters_message(criteria: &FilterCriteria) -> Option<Message> {
    criteria.is_active().then_some(Message::ClearFilters)
}

pub fn search_input_id() -> text_input::Id {
    text_input::Id::new("product-search")
}

/// Search bar, brand filter and the product grid
pub fn view(session: &Session) -> Element<'_, Message> {
    let criteria = session.criteria();
    let selection = session.selection();

    let heading = column![
        text("Premium Products").size(36),
        text(format!(
            "Select up to {} products to compare side by side",
            selection.capacity()
        ))
        .size(16)
        .color(MUTED_COLOR),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .width(Length::Fill);

    let search = text_input("Search products, brands, features (Ctrl+K)", &criteria.search_query)
        .id(search_input_id())
        .on_input(Message::SearchChanged)
        .padding(10)
        .width(Length::Fill);

    let clear_filters = button(text("Clear").size(14))
        .on_press_maybe(clear_filters_message(criteria))
        .style(button::text);

    let brand_picker = pick_list(
        brand_options(&session.brands()),
        Some(BrandOption::from_filter(criteria.brand_filter.as_deref())),
        Message::BrandSelected,
    )
    .padding(10);

    let count = text(format!("{}", session.result_count()))
        .size(14)
        .color(MUTED_COLOR);

    let toolbar = row![search, brand_picker, clear_filters, count]
        .spacing(12)
        .align_y(Alignment::Center);

    let products = session.visible_products();
    let grid: Element<'_, Message> = if products.is_empty() {
        column![
            text("No products found").size(20),
            text("Try a different search or brand").color(MUTED_COLOR),
            button("Clear Filters")
                .on_press(Message::ClearFilters)
                .style(button::secondary),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
    } else {
        let cards = products
            .into_iter()
            .map(|product| {
                product_card(
                    product,
                    selection.is_selected(&product.id),
                    selection.is_full(),
                )
            })
            .collect();
        Wrap::with_elements(cards)
            .spacing(16.0)
            .line_spacing(16.0)
            .into()
    };

    scrollable(
        column![heading, toolbar, grid]
            .spacing(24)
            .padding(32)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}

/// A product tile; pressing it toggles selection
fn product_card(product: &Product, is_selected: bool, is_max_reached: bool) -> Element<'_, Message> {
    let features = product
        .features
        .iter()
        .fold(Column::new().spacing(2), |col, feature| {
            col.push(text(format!("• {}", feature)).size(13))
        });

    let status = if is_selected {
        "✓ Selected"
    } else if is_max_reached {
        "Comparison full"
    } else {
        "+ Add to compare"
    };

    let body = column![
        text(&product.brand).size(12).color(MUTED_COLOR),
        text(&product.name).size(18),
        text(&product.price).size(16),
        features,
        text(status).size(13),
    ]
    .spacing(6)
    .padding(12)
    .width(Length::Fixed(CARD_WIDTH));

    let style: fn(&Theme, button::Status) -> button::Style = if is_selected {
        button::primary
    } else {
        button::secondary
    };

    // A full selection only accepts presses that deselect
    let on_press = (is_selected || !is_max_reached).then(|| Message::ToggleSelect(product.id.clone()));

    button(body).on_press_maybe(on_press).style(style).into()
}
