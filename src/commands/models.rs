use tokio::sync::oneshot;

use crate::error::MinterError;
use crate::storage::models::IssuedCode;

pub type Reply<T> = oneshot::Sender<Result<T, MinterError>>;

pub enum Command {
    GenerateCode {
        length: usize,
        response: Reply<IssuedCode>,
    },
    ListCodes {
        response: Reply<Vec<String>>,
    },
    CheckCode {
        code: String,
        response: Reply<bool>,
    },
}
