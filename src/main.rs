use cannon::error::AppResult;

fn main() -> AppResult<()> {
    cannon::entry::run()
}
