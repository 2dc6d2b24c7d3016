/// Comparison panel
///
/// Wide windows get the full table with one column per product. Narrow
/// windows get a tab per product and show only the active one, using
/// the session's active index.

use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column, Row, Text};
use iced::{Alignment, Element, Length, Theme};

use crate::state::comparison::SpecRow;
use crate::state::data::{is_not_applicable, Product};
use crate::state::session::Session;
use crate::ui::{short_name, DIFFERS_COLOR, MUTED_COLOR};
use crate::Message;

const LABEL_WIDTH: f32 = 140.0;

pub fn view(session: &Session, narrow: bool) -> Element<'_, Message> {
    let subtitle = if narrow {
        "Use the tabs or arrow keys"
    } else {
        "Compare specifications side by side"
    };

    let header = row![
        column![
            text("Product Comparison").size(28),
            text(subtitle).size(14).color(MUTED_COLOR),
        ]
        .spacing(4),
        horizontal_space(),
        button("Close (Esc)")
            .on_press(Message::CloseComparison)
            .style(button::secondary),
    ]
    .align_y(Alignment::Center);

    let rows = session.comparison_rows();
    let body = if narrow {
        single_product(session, &rows)
    } else {
        table(session.selection().products(), &rows)
    };

    let legend = text("Highlighted values differ across products")
        .size(13)
        .color(DIFFERS_COLOR);

    scrollable(
        column![header, body, legend]
            .spacing(24)
            .padding(32)
            .width(Length::Fill),
    )
    .height(Length::Fill)
    .into()
}

/// Full table: product headers across, one row per spec
fn table<'a>(products: &'a [Product], rows: &[SpecRow<'a>]) -> Element<'a, Message> {
    let headers = products.iter().map(|product| {
        column![
            text(&product.brand).size(12).color(MUTED_COLOR),
            text(&product.name).size(18),
            text(&product.price).size(16),
            button(text("Remove").size(12))
                .on_press(Message::Remove(product.id.clone()))
                .style(button::text)
                .padding(0),
        ]
        .spacing(4)
        .width(Length::FillPortion(1))
        .into()
    });

    let header_row = Row::with_children(
        std::iter::once(label_cell("Specification", false)).chain(headers),
    )
    .spacing(16);

    let spec_rows = rows.iter().map(|spec_row| {
        let values = spec_row.values.iter().copied().map(|value| {
            container(spec_value(value, spec_row.differs))
                .width(Length::FillPortion(1))
                .into()
        });

        let cells = Row::with_children(
            std::iter::once(label_cell(spec_row.label, spec_row.differs)).chain(values),
        )
        .spacing(16)
        .padding([8, 0]);

        container(cells).width(Length::Fill).into()
    });

    Column::with_children(std::iter::once(header_row.into()).chain(spec_rows))
        .spacing(4)
        .into()
}

/// Narrow layout: tabs for every product, specs of the active one below
fn single_product<'a>(session: &'a Session, rows: &[SpecRow<'a>]) -> Element<'a, Message> {
    let products = session.selection().products();
    let active_index = session.comparison().active_index().unwrap_or(0);

    let tabs = Row::with_children(products.iter().enumerate().map(|(index, product)| {
        let style: fn(&Theme, button::Status) -> button::Style = if index == active_index {
            button::primary
        } else {
            button::text
        };
        button(text(short_name(&product.name)).size(14))
            .on_press(Message::SelectTab(index))
            .style(style)
            .width(Length::Fill)
            .into()
    }))
    .spacing(4);

    let Some(active) = session.active_product() else {
        return tabs.into();
    };

    let summary = row![
        column![
            text(&active.name).size(20),
            text(&active.price).size(16),
        ]
        .spacing(4),
        horizontal_space(),
        button(text("Remove").size(12))
            .on_press(Message::Remove(active.id.clone()))
            .style(button::text),
    ]
    .align_y(Alignment::Center);

    let specs = Column::with_children(rows.iter().map(|spec_row| {
        let value = spec_row
            .values
            .get(active_index)
            .copied()
            .unwrap_or_default();
        row![
            label_cell(spec_row.label, spec_row.differs),
            spec_value(value, spec_row.differs),
        ]
        .spacing(12)
        .padding([6, 0])
        .into()
    }))
    .spacing(2);

    column![tabs, summary, specs].spacing(16).into()
}

fn label_cell(label: &str, differs: bool) -> Element<'_, Message> {
    let marker = if differs { "● " } else { "" };
    let cell = text(format!("{}{}", marker, label)).size(14);
    let cell = if differs { cell.color(DIFFERS_COLOR) } else { cell };
    container(cell).width(Length::Fixed(LABEL_WIDTH)).into()
}

fn spec_value(value: &str, differs: bool) -> Text<'_> {
    let cell = text(value).size(14);
    if is_not_applicable(value) {
        cell.color(MUTED_COLOR)
    } else if differs {
        cell.color(DIFFERS_COLOR)
    } else {
        cell
    }
}
