/// Destination for narration. Each call emits exactly one line to the player.
pub trait OutputSink {
    fn say(&mut self, line: &str);
}

impl OutputSink for Vec<String> {
    fn say(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
