use crate::store::mvi::Reducer;
use crate::store::session::intent::SessionIntent;
use crate::store::session::state::SessionState;

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SessionIntent::RequestStarted => SessionState {
                is_loading: true,
                error: None,
                ..state
            },
            SessionIntent::RequestFinished => SessionState {
                is_loading: false,
                ..state
            },
            SessionIntent::Authenticated { user, token } => SessionState {
                user: Some(user),
                token: Some(token),
                ..state
            },
            SessionIntent::UserLoaded { user } => SessionState {
                user: Some(user),
                ..state
            },
            SessionIntent::SignedOut => SessionState {
                user: None,
                token: None,
                ..state
            },
            SessionIntent::Failed { message } => SessionState {
                error: Some(message),
                ..state
            },
        }
    }
}
