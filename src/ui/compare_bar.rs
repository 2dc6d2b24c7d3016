use iced::widget::{button, container, horizontal_space, row, text, Row};
use iced::{Alignment, Element, Length};

use crate::state::selection::SelectionStore;
use crate::ui::{short_name, MUTED_COLOR};
use crate::Message;

/// Bottom bar listing the selected products.
/// Only shown once there is something to compare.
pub fn view(selection: &SelectionStore) -> Option<Element<'_, Message>> {
    if !selection.can_compare() {
        return None;
    }

    let mut chips: Vec<Element<'_, Message>> = selection
        .products()
        .iter()
        .map(|product| {
            container(
                row![
                    text(short_name(&product.name)).size(14),
                    button(text("✕").size(12))
                        .on_press(Message::Remove(product.id.clone()))
                        .style(button::text)
                        .padding(2),
                ]
                .spacing(4)
                .align_y(Alignment::Center),
            )
            .padding([4, 10])
            .style(container::rounded_box)
            .into()
        })
        .collect();

    chips.extend((0..selection.open_slots()).map(|_| {
        container(text("+ Add").size(14).color(MUTED_COLOR))
            .padding([4, 10])
            .into()
    }));

    let chips = Row::with_children(chips)
        .spacing(8)
        .align_y(Alignment::Center);

    let bar = row![
        text("Comparing:").size(14).color(MUTED_COLOR),
        chips,
        horizontal_space(),
        button("Clear all")
            .on_press(Message::ClearAll)
            .style(button::secondary),
        button(text(format!("Compare ({})", selection.len())))
            .on_press(Message::Compare)
            .style(button::primary),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    Some(
        container(bar)
            .padding([12, 24])
            .width(Length::Fill)
            .style(container::rounded_box)
            .into(),
    )
}
