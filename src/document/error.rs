/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Copy, Clone)]
pub enum DocumentError {
    /// The call needs cursor state the caller did not set up, like an
    /// open element to undo.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),
}

pub(crate) mod description {
    pub(crate) const NO_ACTIVE_ELEMENT: &str = "no element has been started yet";
    pub(crate) const NO_CHILD_ELEMENT: &str =
        "the active element has no closed child element to delete";
}
