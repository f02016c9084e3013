/// Whoever is looking at, or trying to change, a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated { user_id: i64 },
}

impl Viewer {
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated { user_id } => Some(*user_id),
        }
    }

    pub fn is(&self, user_id: i64) -> bool {
        self.user_id() == Some(user_id)
    }
}

impl From<Option<i64>> for Viewer {
    fn from(user_id: Option<i64>) -> Self {
        match user_id {
            Some(user_id) => Viewer::Authenticated { user_id },
            None => Viewer::Anonymous,
        }
    }
}
