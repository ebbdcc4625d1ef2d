//! Parse notification / diagnostic system.
//!
//! Non-fatal issues encountered during reading are reported through the
//! [`Diagnostics`] trait as a message template with positional arguments
//! (`{0}`, `{1}`, ...) rather than being silently dropped or causing hard
//! errors. [`NotificationCollection`] is the stock implementation: it keeps
//! every notification so the caller can inspect them after the read.

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// An entity/object/section is not yet implemented.
    NotImplemented,
    /// Feature exists but is not supported in this context.
    NotSupported,
    /// Non-fatal warning (e.g., unknown group code, unresolved owner).
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// Receiver of recoverable anomalies found while decoding.
pub trait Diagnostics {
    /// Report a notification built from `template` and its positional `args`.
    fn notify(&mut self, notification_type: NotificationType, template: &str, args: &[&dyn fmt::Display]);

    /// Report a plain warning.
    fn warn(&mut self, template: &str, args: &[&dyn fmt::Display]) {
        self.notify(NotificationType::Warning, template, args);
    }
}

/// Substitute `{n}` placeholders in `template` with the matching argument.
///
/// Placeholders without a matching argument are left as written.
pub fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let replaced = tail[1..].find('}').and_then(|close| {
            let index: usize = tail[1..=close].parse().ok()?;
            Some((args.get(index)?, close + 2))
        });
        match replaced {
            Some((arg, consumed)) => {
                out.push_str(arg);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// A single notification produced during reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The severity / category.
    pub notification_type: NotificationType,
    /// Message template with `{n}` placeholders.
    pub template: String,
    /// Positional arguments, already rendered.
    pub args: Vec<String>,
}

impl Notification {
    /// Create a new notification.
    pub fn new(
        notification_type: NotificationType,
        template: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            notification_type,
            template: template.into(),
            args,
        }
    }

    /// The template with its arguments substituted.
    pub fn message(&self) -> String {
        format_template(&self.template, &self.args)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message())
    }
}

/// Collects notifications during a read operation.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl Diagnostics for NotificationCollection {
    fn notify(&mut self, notification_type: NotificationType, template: &str, args: &[&dyn fmt::Display]) {
        let args = args.iter().map(|a| a.to_string()).collect();
        self.items.push(Notification::new(notification_type, template, args));
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
