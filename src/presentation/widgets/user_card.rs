use ratatui::{
    prelude::*,
    widgets::ListItem,
};

use crate::domain::{text::truncate_to_width, User};

/// Two-line list entry: name, then contact and place
#[derive(Clone, Debug)]
pub struct UserCard<'a> {
    pub user: &'a User,
    pub width: usize,
}

impl<'a> UserCard<'a> {
    pub fn new(user: &'a User, width: usize) -> Self {
        Self { user, width }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let name = truncate_to_width(&self.user.full_name(), self.width);
        let details = truncate_to_width(
            &format!(
                "{} · {}, {}",
                self.user.email, self.user.location.city, self.user.location.country
            ),
            self.width,
        );
        vec![
            Line::from(Span::styled(name, Style::default().bold())),
            Line::from(Span::styled(details, Style::default().fg(Color::Gray))),
        ]
    }
}

impl<'a> From<UserCard<'a>> for ListItem<'static> {
    fn from(value: UserCard<'a>) -> Self {
        ListItem::new(Text::from(value.lines()))
    }
}
