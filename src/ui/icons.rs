pub struct Icons;

impl Icons {
    pub const BEER: &str = "🍺";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    /// Read request
    pub const MAG: &str = "🔎";
    /// Mutation
    pub const PENCIL: &str = "✏️";
}
