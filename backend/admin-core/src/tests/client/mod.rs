mod descriptor;
mod retry;
